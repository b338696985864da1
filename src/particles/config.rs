use crate::game::GameRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range sampled uniformly; `min == max` is a fixed value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Range { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Range { min: value, max: value }
    }

    pub fn sample(&self, rng: &mut GameRng) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Per-particle sampling ranges for one emission mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionRanges {
    /// Pixels per second, in a uniformly random direction
    pub speed: Range,
    /// Seconds
    pub life: Range,
    /// Diameter in pixels
    pub size: Range,
    pub red: Range,
    pub green: Range,
    pub blue: Range,
}

/// Configuration of a [`ParticleSystem`](super::ParticleSystem)
///
/// Continuous emission samples from `emit`, [`burst`](super::ParticleSystem::burst)
/// samples from `burst`. Presets below cover every effect the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Particles emitted when the system is created
    pub initial_count: u32,
    /// Continuous particles per second while active (0 disables)
    pub spawn_rate: f32,
    /// Hard cap on live particles
    pub max_particles: usize,
    pub opacity_multiplier: f32,
    /// Smallest diameter ever drawn
    pub min_render_size: f32,
    pub emit: EmissionRanges,
    pub burst: EmissionRanges,
}

impl ParticleConfig {
    /// Warm sparks left behind the player
    pub fn player_trail() -> Self {
        let ranges = EmissionRanges {
            speed: Range::new(10.0, 40.0),
            life: Range::new(0.3, 0.7),
            size: Range::new(3.0, 6.0),
            red: Range::fixed(1.0),
            green: Range::new(0.5, 0.8),
            blue: Range::new(0.0, 0.2),
        };
        ParticleConfig {
            initial_count: 0,
            spawn_rate: 40.0,
            max_particles: 256,
            opacity_multiplier: 0.8,
            min_render_size: 2.0,
            emit: ranges,
            burst: ranges,
        }
    }

    /// Soft glow around each living enemy
    pub fn light() -> Self {
        let ranges = EmissionRanges {
            speed: Range::new(5.0, 25.0),
            life: Range::new(0.5, 1.0),
            size: Range::new(2.0, 5.0),
            red: Range::new(0.6, 0.9),
            green: Range::new(0.8, 1.0),
            blue: Range::fixed(1.0),
        };
        ParticleConfig {
            initial_count: 0,
            spawn_rate: 15.0,
            max_particles: 128,
            opacity_multiplier: 0.6,
            min_render_size: 2.0,
            emit: ranges,
            burst: ranges,
        }
    }

    /// Red blast used for the player's death (burst only)
    pub fn explosion() -> Self {
        let ranges = EmissionRanges {
            speed: Range::new(250.0, 520.0),
            life: Range::new(0.5, 1.2),
            size: Range::new(18.0, 42.0),
            red: Range::fixed(1.0),
            green: Range::new(0.0, 0.05),
            blue: Range::fixed(0.0),
        };
        ParticleConfig {
            initial_count: 0,
            spawn_rate: 9999.0,
            max_particles: 512,
            opacity_multiplier: 1.0,
            min_render_size: 3.0,
            emit: ranges,
            burst: ranges,
        }
    }

    /// Short spark where a hit lands (burst only)
    pub fn impact() -> Self {
        let ranges = EmissionRanges {
            speed: Range::new(80.0, 200.0),
            life: Range::new(0.15, 0.35),
            size: Range::new(3.0, 6.0),
            red: Range::fixed(1.0),
            green: Range::new(0.8, 1.0),
            blue: Range::new(0.2, 0.4),
        };
        ParticleConfig {
            initial_count: 0,
            spawn_rate: 0.0,
            max_particles: 64,
            opacity_multiplier: 1.0,
            min_render_size: 2.0,
            emit: ranges,
            burst: ranges,
        }
    }

    /// Longest life either mode can sample
    pub fn max_life(&self) -> f32 {
        self.emit.life.max.max(self.burst.life.max)
    }
}
