// src/interview/selector.rs
// Weighted-random persona rotation and the follow-up/new-topic decision.
// The random source is injected so tests can drive it deterministically.

use rand::Rng;

use crate::persona::PersonaId;

/// Outcome of one turn-selection decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnDecision {
    pub next_persona: PersonaId,
    pub is_follow_up: bool,
    pub forced_new_topic: bool,
}

/// Probability that the current persona keeps probing the same topic.
/// Starts at 0.6 and decays by 0.05 per turn, floored at 0.3.
pub fn follow_up_probability(turn_count: i64) -> f64 {
    (0.6 - 0.05 * turn_count as f64).max(0.3)
}

/// Decides the next turn. When `force_new_topic` is set the current persona
/// must not continue; otherwise an early-turn-biased coin decides between a
/// follow-up by the same persona and a weighted switch.
pub fn select_turn(
    current: PersonaId,
    turn_count: i64,
    force_new_topic: bool,
    rng: &mut impl Rng,
) -> TurnDecision {
    if force_new_topic {
        return TurnDecision {
            next_persona: select_other_weighted(current, rng),
            is_follow_up: false,
            forced_new_topic: true,
        };
    }

    if rng.random_range(0.0..1.0) < follow_up_probability(turn_count) {
        return TurnDecision {
            next_persona: current,
            is_follow_up: true,
            forced_new_topic: false,
        };
    }

    TurnDecision {
        next_persona: select_other_weighted(current, rng),
        is_follow_up: false,
        forced_new_topic: false,
    }
}

/// Weighted pick over the two personas other than `current`, using
/// renormalized base weights.
fn select_other_weighted(current: PersonaId, rng: &mut impl Rng) -> PersonaId {
    let eligible: Vec<PersonaId> = PersonaId::ALL.iter().copied().filter(|p| *p != current).collect();
    let total: f64 = eligible.iter().map(|p| p.base_weight()).sum();
    let u = rng.random_range(0.0..total);
    pick_by_cumulative_weight(&eligible, u)
}

/// Walks `eligible` in its fixed order accumulating base weights and returns
/// the first persona whose cumulative weight reaches `u`. Falls back to the
/// first eligible persona if floating-point drift leaves `u` unconsumed.
pub fn pick_by_cumulative_weight(eligible: &[PersonaId], u: f64) -> PersonaId {
    let mut cumulative = 0.0;
    for persona in eligible {
        cumulative += persona.base_weight();
        if u <= cumulative {
            return *persona;
        }
    }
    eligible[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn probability_starts_high_and_floors_at_point_three() {
        assert!((follow_up_probability(0) - 0.6).abs() < 1e-12);
        assert!((follow_up_probability(3) - 0.45).abs() < 1e-12);
        assert!((follow_up_probability(6) - 0.3).abs() < 1e-12);
        assert!((follow_up_probability(10) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn cumulative_walk_respects_boundaries() {
        let eligible = [PersonaId::HiringManager, PersonaId::HrManager];
        assert_eq!(pick_by_cumulative_weight(&eligible, 0.0), PersonaId::HiringManager);
        assert_eq!(pick_by_cumulative_weight(&eligible, 0.4), PersonaId::HiringManager);
        assert_eq!(pick_by_cumulative_weight(&eligible, 0.41), PersonaId::HrManager);
        assert_eq!(pick_by_cumulative_weight(&eligible, 0.6), PersonaId::HrManager);
        // Drift past the total falls back to the first eligible persona.
        assert_eq!(pick_by_cumulative_weight(&eligible, 0.600001), PersonaId::HiringManager);
    }

    #[test]
    fn forced_switch_never_returns_current_persona() {
        let mut rng = StdRng::seed_from_u64(42);
        for current in PersonaId::ALL {
            for _ in 0..1000 {
                let decision = select_turn(current, 5, true, &mut rng);
                assert_ne!(decision.next_persona, current);
                assert!(!decision.is_follow_up);
                assert!(decision.forced_new_topic);
            }
        }
    }

    #[test]
    fn follow_up_keeps_current_persona() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_follow_up = false;
        for _ in 0..200 {
            let decision = select_turn(PersonaId::SeniorPeer, 0, false, &mut rng);
            if decision.is_follow_up {
                assert_eq!(decision.next_persona, PersonaId::SeniorPeer);
                assert!(!decision.forced_new_topic);
                saw_follow_up = true;
            }
        }
        assert!(saw_follow_up);
    }

    #[test]
    fn weighted_selection_matches_base_weights() {
        // Excluding senior_peer leaves {hiring_manager: 0.4, hr_manager: 0.2};
        // hiring_manager should win about 2/3 of the time.
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts: HashMap<PersonaId, usize> = HashMap::new();
        let draws = 10_000;
        for _ in 0..draws {
            let picked = select_other_weighted(PersonaId::SeniorPeer, &mut rng);
            *counts.entry(picked).or_default() += 1;
        }
        let hm = counts[&PersonaId::HiringManager] as f64 / draws as f64;
        assert!((hm - 2.0 / 3.0).abs() < 0.05, "hiring_manager frequency {hm}");
        assert!(!counts.contains_key(&PersonaId::SeniorPeer));
    }

    #[test]
    fn follow_up_frequency_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(1234);
        let draws = 10_000;
        let follow_ups = (0..draws)
            .filter(|_| select_turn(PersonaId::HiringManager, 0, false, &mut rng).is_follow_up)
            .count();
        let freq = follow_ups as f64 / draws as f64;
        assert!((freq - 0.6).abs() < 0.05, "follow-up frequency {freq}");
    }
}
