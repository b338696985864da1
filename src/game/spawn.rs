//! Enemy spawn placement
//!
//! Rejection sampling: draw a point uniformly inside the map, reject it if it
//! lands closer than `min_distance` to the player, try again. After
//! `max_attempts` draws the last candidate is accepted no matter what, which
//! is what guarantees termination on a crowded or tiny map.

use crate::game::GameRng;
use crate::math::Vector2;
use rand::Rng;

/// Parameters for one placement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub min_distance: f32,
    /// At least one draw is always made
    pub max_attempts: u32,
    pub width: f32,
    pub height: f32,
}

/// Where the spawner put an enemy and how hard it had to try
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlacement {
    pub position: Vector2,
    pub attempts: u32,
    /// True when the attempt bound ran out and a too-close point was accepted
    pub fallback: bool,
}

/// Samples a spawn position at least `policy.min_distance` from `player`
///
/// # Example
///
/// ```rust
/// use hulu_brawl::game::{seeded_rng, spawn::{sample_spawn_position, SpawnPolicy}};
/// use hulu_brawl::math::Vector2;
///
/// let mut rng = seeded_rng(42);
/// let policy = SpawnPolicy { min_distance: 400.0, max_attempts: 200, width: 1600.0, height: 1200.0 };
/// let player = Vector2::new(800.0, 600.0);
///
/// let placement = sample_spawn_position(&mut rng, player, &policy);
/// assert!(placement.fallback || placement.position.distance(player) >= 400.0);
/// ```
pub fn sample_spawn_position(rng: &mut GameRng, player: Vector2, policy: &SpawnPolicy) -> SpawnPlacement {
    let max_attempts = policy.max_attempts.max(1);
    let mut candidate = Vector2::ZERO;

    for attempt in 1..=max_attempts {
        candidate = Vector2::new(
            rng.gen_range(0.0..=policy.width.max(0.0)),
            rng.gen_range(0.0..=policy.height.max(0.0)),
        );
        if candidate.distance(player) >= policy.min_distance {
            return SpawnPlacement {
                position: candidate,
                attempts: attempt,
                fallback: false,
            };
        }
    }

    log::debug!(
        "spawn placement gave up after {} attempts, accepting {:?}",
        max_attempts,
        candidate
    );
    SpawnPlacement {
        position: candidate,
        attempts: max_attempts,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seeded_rng;

    fn policy(min_distance: f32, max_attempts: u32) -> SpawnPolicy {
        SpawnPolicy {
            min_distance,
            max_attempts,
            width: 1600.0,
            height: 1200.0,
        }
    }

    #[test]
    fn test_placement_respects_min_distance() {
        let player = Vector2::new(800.0, 600.0);
        for seed in 0..50 {
            let mut rng = seeded_rng(seed);
            let placement = sample_spawn_position(&mut rng, player, &policy(400.0, 200));
            if !placement.fallback {
                assert!(placement.position.distance(player) >= 400.0);
            }
            assert!(placement.position.x >= 0.0 && placement.position.x <= 1600.0);
            assert!(placement.position.y >= 0.0 && placement.position.y <= 1200.0);
        }
    }

    #[test]
    fn test_impossible_distance_falls_back_after_bound() {
        let mut rng = seeded_rng(7);
        // Nothing on a 1600x1200 map is 5000 px from the centre
        let placement = sample_spawn_position(&mut rng, Vector2::new(800.0, 600.0), &policy(5000.0, 25));

        assert!(placement.fallback);
        assert_eq!(placement.attempts, 25);
    }

    #[test]
    fn test_same_seed_same_position() {
        let player = Vector2::new(800.0, 600.0);
        let a = sample_spawn_position(&mut seeded_rng(99), player, &policy(400.0, 200));
        let b = sample_spawn_position(&mut seeded_rng(99), player, &policy(400.0, 200));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_attempts_still_draws_once() {
        let mut rng = seeded_rng(1);
        let placement = sample_spawn_position(&mut rng, Vector2::new(800.0, 600.0), &policy(0.0, 0));
        assert_eq!(placement.attempts, 1);
        assert!(!placement.fallback);
    }
}
