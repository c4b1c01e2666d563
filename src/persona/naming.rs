// src/persona/naming.rs
// Session-scoped persona randomization: each session assigns every persona a
// display name and an MBTI tag at creation time. Stored in the session's
// config blob, never as separate rows.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::PersonaId;

const MBTI_TYPES: [&str; 16] = [
    "ISTJ", "ISFJ", "INFJ", "INTJ", "ISTP", "ISFP", "INFP", "INTP", "ESTP", "ESFP", "ENFP",
    "ENTP", "ESTJ", "ESFJ", "ENFJ", "ENTJ",
];

const FIRST_NAMES: [&str; 12] = [
    "Morgan", "Casey", "Jordan", "Riley", "Avery", "Quinn", "Hayden", "Rowan", "Sage", "Ellis",
    "Reese", "Blake",
];

const LAST_NAMES: [&str; 10] = [
    "Kim", "Park", "Lee", "Chen", "Alvarez", "Novak", "Singh", "Okafor", "Mueller", "Tanaka",
];

/// One persona's session-local identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewerCard {
    pub name: String,
    pub mbti: String,
}

/// All three cards for a session, serialized into the session config blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInterviewers {
    pub hiring_manager: InterviewerCard,
    pub hr_manager: InterviewerCard,
    pub senior_peer: InterviewerCard,
}

impl SessionInterviewers {
    pub fn randomize(rng: &mut impl Rng) -> Self {
        Self {
            hiring_manager: random_card(rng),
            hr_manager: random_card(rng),
            senior_peer: random_card(rng),
        }
    }

    pub fn card(&self, id: PersonaId) -> &InterviewerCard {
        match id {
            PersonaId::HiringManager => &self.hiring_manager,
            PersonaId::HrManager => &self.hr_manager,
            PersonaId::SeniorPeer => &self.senior_peer,
        }
    }
}

fn random_card(rng: &mut impl Rng) -> InterviewerCard {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Morgan");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Kim");
    let mbti = MBTI_TYPES.choose(rng).copied().unwrap_or("ENTJ");
    InterviewerCard {
        name: format!("{first} {last}"),
        mbti: mbti.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn randomize_is_deterministic_per_seed() {
        let a = SessionInterviewers::randomize(&mut StdRng::seed_from_u64(7));
        let b = SessionInterviewers::randomize(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn cards_survive_json_round_trip() {
        let cards = SessionInterviewers::randomize(&mut StdRng::seed_from_u64(1));
        let json = serde_json::to_string(&cards).unwrap();
        let back: SessionInterviewers = serde_json::from_str(&json).unwrap();
        assert_eq!(cards, back);
        assert_eq!(back.card(PersonaId::HrManager), &back.hr_manager);
    }
}
