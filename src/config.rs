//! Game tuning loaded from JSON
//!
//! Every number the rule engine, spawner, particle wiring, and recorder use
//! lives here. `assets/config/game.json` only needs the values it overrides:
//! each section is `#[serde(default)]`, so a missing field (or a missing
//! section) keeps the built-in value.
//!
//! # Example
//!
//! ```rust
//! use hulu_brawl::config::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "collision": { "hit_distance": 30.0 } }"#).unwrap();
//! assert_eq!(config.collision.hit_distance, 30.0);
//! assert_eq!(config.player.health, 100); // untouched default
//! ```

use crate::error::ConfigError;
use crate::math::Vector2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed; `None` seeds from the clock at session start
    pub seed: Option<u64>,
    pub map: MapConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub soldier: EnemyConfig,
    pub king: EnemyConfig,
    pub king_weapon: WeaponConfig,
    pub pursuit: PursuitConfig,
    pub collision: CollisionConfig,
    pub spawn: SpawnConfig,
    pub levels: LevelsConfig,
    pub recording: RecordingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speeds below this snap to zero after damping
    pub velocity_epsilon: f32,
    pub projectile_friction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: i32,
    pub speed: f32,
    pub friction: f32,
    /// Seconds between skill casts
    pub skill_cooldown: f32,
    pub bolt_count: u32,
    pub bolt_speed: f32,
    pub bolt_lifetime: f32,
    pub bolt_damage: i32,
    /// Spawn offset range around the caster (total width, centred)
    pub bolt_jitter: f32,
    /// Invulnerability window granted after being struck
    pub invulnerability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub health: i32,
    pub friction: f32,
    /// Maximum speed while chasing the player
    pub pursuit_speed: f32,
    /// Each axis of the spawn velocity is drawn from `[-initial_speed, initial_speed]`
    pub initial_speed: f32,
    /// Damage dealt to the player on body contact
    pub contact_damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub period: f32,
    pub volley_size: u32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub damage: i32,
    /// Half-angle of the fan in radians
    pub spread: f32,
    pub jitter: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Steering acceleration toward the player in px/s²
    pub acceleration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Centre distance below which two opposing entities touch
    pub hit_distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_distance: f32,
    pub soldier_max_attempts: u32,
    pub king_max_attempts: u32,
}

/// One entry of the wave table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveConfig {
    #[serde(default)]
    pub soldiers: u32,
    #[serde(default)]
    pub kings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    /// Waves for levels 1..=n; the last entry repeats for every later level
    pub waves: Vec<WaveConfig>,
    /// Scenery positions placed once at session start
    pub trees: Vec<Vector2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Seconds of simulated time between samples
    pub sample_interval: f32,
    /// Overrides the platform data directory
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds after game over before particles stop moving
    pub freeze_delay: f32,
    /// Seconds after game over before a key press returns
    pub return_cooldown: f32,
    pub explosion_count: u32,
    pub death_burst_count: u32,
    pub impact_burst_count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            map: MapConfig::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            soldier: EnemyConfig::soldier(),
            king: EnemyConfig::king(),
            king_weapon: WeaponConfig::default(),
            pursuit: PursuitConfig::default(),
            collision: CollisionConfig::default(),
            spawn: SpawnConfig::default(),
            levels: LevelsConfig::default(),
            recording: RecordingConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            width: 1600.0,
            height: 1200.0,
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            velocity_epsilon: 0.01,
            projectile_friction: 0.98,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            health: 100,
            speed: 200.0,
            friction: 0.95,
            skill_cooldown: 1.0,
            bolt_count: 2,
            bolt_speed: 420.0,
            bolt_lifetime: 1.0,
            bolt_damage: 10,
            bolt_jitter: 20.0,
            invulnerability: 0.5,
        }
    }
}

impl EnemyConfig {
    pub fn soldier() -> Self {
        EnemyConfig {
            health: 100,
            friction: 0.98,
            pursuit_speed: 80.0,
            initial_speed: 50.0,
            contact_damage: 5,
        }
    }

    pub fn king() -> Self {
        EnemyConfig {
            health: 200,
            friction: 0.98,
            pursuit_speed: 50.0,
            initial_speed: 0.0,
            contact_damage: 5,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig::soldier()
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        WeaponConfig {
            period: 3.0,
            volley_size: 5,
            projectile_speed: 220.0,
            projectile_lifetime: 2.0,
            damage: 10,
            spread: 0.6,
            jitter: 20.0,
        }
    }
}

impl Default for PursuitConfig {
    fn default() -> Self {
        PursuitConfig { acceleration: 240.0 }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig { hit_distance: 24.0 }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            min_distance: 400.0,
            soldier_max_attempts: 200,
            king_max_attempts: 50,
        }
    }
}

impl Default for LevelsConfig {
    fn default() -> Self {
        LevelsConfig {
            waves: vec![
                WaveConfig { soldiers: 6, kings: 0 },
                WaveConfig { soldiers: 0, kings: 1 },
                WaveConfig { soldiers: 6, kings: 1 },
            ],
            trees: vec![
                Vector2::new(240.0, 220.0),
                Vector2::new(1320.0, 300.0),
                Vector2::new(520.0, 960.0),
            ],
        }
    }
}

impl LevelsConfig {
    /// Wave for a 1-based level number; levels past the table repeat the last entry
    pub fn wave_for(&self, level: u32) -> WaveConfig {
        let index = level.saturating_sub(1) as usize;
        self.waves
            .get(index)
            .or_else(|| self.waves.last())
            .copied()
            .unwrap_or(WaveConfig { soldiers: 0, kings: 0 })
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        RecordingConfig {
            sample_interval: 0.02,
            directory: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            freeze_delay: 0.2,
            return_cooldown: 0.25,
            explosion_count: 180,
            death_burst_count: 40,
            impact_burst_count: 12,
        }
    }
}

impl GameConfig {
    /// Reads and validates a config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                GameConfig::default()
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                GameConfig::default()
            }
        }
    }

    /// Rejects values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                })
            }
        }

        fn friction(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be in (0, 1], got {}", value),
                })
            }
        }

        positive("map.width", self.map.width)?;
        positive("map.height", self.map.height)?;
        friction("player.friction", self.player.friction)?;
        friction("soldier.friction", self.soldier.friction)?;
        friction("king.friction", self.king.friction)?;
        friction("physics.projectile_friction", self.physics.projectile_friction)?;
        positive("player.skill_cooldown", self.player.skill_cooldown)?;
        positive("player.bolt_lifetime", self.player.bolt_lifetime)?;
        positive("king_weapon.period", self.king_weapon.period)?;
        positive("king_weapon.projectile_lifetime", self.king_weapon.projectile_lifetime)?;
        positive("collision.hit_distance", self.collision.hit_distance)?;
        positive("recording.sample_interval", self.recording.sample_interval)?;

        if self.player.health <= 0 {
            return Err(ConfigError::Invalid {
                field: "player.health",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.spawn.min_distance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "spawn.min_distance",
                reason: "must not be negative".to_string(),
            });
        }
        if self.levels.waves.is_empty() {
            return Err(ConfigError::Invalid {
                field: "levels.waves",
                reason: "needs at least one wave".to_string(),
            });
        }
        // An empty wave counts as cleared on the tick it spawns
        if let Some(index) = self.levels.waves.iter().position(|w| w.soldiers == 0 && w.kings == 0) {
            return Err(ConfigError::Invalid {
                field: "levels.waves",
                reason: format!("wave {} spawns no enemies", index + 1),
            });
        }
        Ok(())
    }
}
