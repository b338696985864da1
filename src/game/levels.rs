//! Level progression
//!
//! Level 1 is six soldiers, level 2 a lone king, and from level 3 on every
//! wave is six soldiers plus a king (all configurable through
//! `levels.waves`). Three trees are placed once as scenery.
//!
//! Waves are queued, not inserted: a new wave joins the registry at the next
//! safe point, so the tick that cleared the previous wave never sees it.

use crate::config::{EnemyConfig, GameConfig, WaveConfig};
use crate::game::rules::GameRules;
use crate::game::spawn::{SpawnPolicy, sample_spawn_position};
use crate::game::{GameRng, prefabs};
use crate::math::Vector2;
use rand::Rng;

/// Tracks the current level and spawns its wave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDirector {
    level: u32,
}

impl Default for LevelDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelDirector {
    pub fn new() -> Self {
        LevelDirector { level: 1 }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Moves to the next level and returns its number
    pub fn advance(&mut self) -> u32 {
        self.level += 1;
        log::info!("advancing to level {}", self.level);
        self.level
    }

    pub fn current_wave(&self, config: &GameConfig) -> WaveConfig {
        config.levels.wave_for(self.level)
    }

    /// Queues the current level's wave around the player's current position
    ///
    /// Returns the wave that was queued.
    pub fn spawn_wave(&self, rules: &mut GameRules, rng: &mut GameRng) -> WaveConfig {
        let config = rules.config().clone();
        let wave = self.current_wave(&config);
        let player = rules.player_position().unwrap_or_else(|| config.map.center());

        for _ in 0..wave.soldiers {
            let policy = spawn_policy(&config, config.spawn.soldier_max_attempts);
            let placement = sample_spawn_position(rng, player, &policy);
            let velocity = initial_velocity(&config.soldier, rng);
            rules
                .registry_mut()
                .queue(prefabs::enemy_soldier(&config, placement.position, velocity));
        }
        for _ in 0..wave.kings {
            let policy = spawn_policy(&config, config.spawn.king_max_attempts);
            let placement = sample_spawn_position(rng, player, &policy);
            rules
                .registry_mut()
                .queue(prefabs::enemy_king(&config, placement.position));
        }

        log::info!(
            "level {}: {} soldier(s), {} king(s)",
            self.level,
            wave.soldiers,
            wave.kings
        );
        wave
    }
}

/// Adds the configured trees immediately
pub fn place_scenery(rules: &mut GameRules) {
    let trees = rules.config().levels.trees.clone();
    for position in trees {
        rules.registry_mut().add(prefabs::tree(position));
    }
}

fn spawn_policy(config: &GameConfig, max_attempts: u32) -> SpawnPolicy {
    SpawnPolicy {
        min_distance: config.spawn.min_distance,
        max_attempts,
        width: config.map.width,
        height: config.map.height,
    }
}

fn initial_velocity(enemy: &EnemyConfig, rng: &mut GameRng) -> Vector2 {
    let speed = enemy.initial_speed;
    if speed <= 0.0 {
        return Vector2::ZERO;
    }
    Vector2::new(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed))
}
