// src/persona/mod.rs
// The three interviewer personas and their session-scoped randomization.

pub mod hiring_manager;
pub mod hr_manager;
pub mod senior_peer;
pub mod naming;

use serde::{Deserialize, Serialize};

pub use hiring_manager::HIRING_MANAGER_PROMPT;
pub use hr_manager::HR_MANAGER_PROMPT;
pub use senior_peer::SENIOR_PEER_PROMPT;

/// The three fixed interviewer archetypes. The set never changes at runtime;
/// per-session variation is limited to display names and personality tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaId {
    HiringManager,
    HrManager,
    SeniorPeer,
}

impl PersonaId {
    /// Fixed enumeration order. Weighted sampling walks this order, so it is
    /// part of the selection contract, not just a convenience.
    pub const ALL: [PersonaId; 3] = [
        PersonaId::HiringManager,
        PersonaId::HrManager,
        PersonaId::SeniorPeer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::HiringManager => "hiring_manager",
            PersonaId::HrManager => "hr_manager",
            PersonaId::SeniorPeer => "senior_peer",
        }
    }

    /// Base selection weight used by the turn selector.
    pub fn base_weight(&self) -> f64 {
        match self {
            PersonaId::HiringManager => 0.4,
            PersonaId::HrManager => 0.2,
            PersonaId::SeniorPeer => 0.4,
        }
    }

    pub fn profile(&self) -> &'static Persona {
        match self {
            PersonaId::HiringManager => &hiring_manager::PROFILE,
            PersonaId::HrManager => &hr_manager::PROFILE,
            PersonaId::SeniorPeer => &senior_peer::PROFILE,
        }
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hiring_manager" => Ok(PersonaId::HiringManager),
            "hr_manager" => Ok(PersonaId::HrManager),
            "senior_peer" => Ok(PersonaId::SeniorPeer),
            _ => Err(()),
        }
    }
}

/// Static persona profile. Prompt templates live in the per-persona modules.
#[derive(Debug)]
pub struct Persona {
    pub id: PersonaId,
    pub role: &'static str,
    pub tone: &'static [&'static str],
    pub focus_areas: &'static [&'static str],
    pub evaluation_criteria: &'static [&'static str],
    pub system_prompt: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn persona_ids_round_trip() {
        for id in PersonaId::ALL {
            assert_eq!(PersonaId::from_str(id.as_str()), Ok(id));
        }
        assert!(PersonaId::from_str("ceo").is_err());
    }

    #[test]
    fn base_weights_match_registry() {
        let total: f64 = PersonaId::ALL.iter().map(|p| p.base_weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(PersonaId::HrManager.base_weight(), 0.2);
    }

    #[test]
    fn profiles_carry_prompts() {
        for id in PersonaId::ALL {
            assert!(!id.profile().system_prompt.trim().is_empty());
            assert_eq!(id.profile().id, id);
        }
    }
}
