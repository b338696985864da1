use super::config::{EmissionRanges, ParticleConfig};
use crate::game::GameRng;
use crate::math::Vector2;
use crate::render::{Color, Renderer};
use rand::Rng;
use std::f32::consts::TAU;

/// One short-lived visual particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Seconds left
    pub life: f32,
    pub initial_life: f32,
    pub size: f32,
    pub color: Color,
}

impl Particle {
    /// `life / initial_life`, 1.0 when freshly spawned
    pub fn life_fraction(&self) -> f32 {
        if self.initial_life > 0.0 {
            (self.life / self.initial_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Particles bound to one anchor position
///
/// Two emission modes share the same particle list:
/// - continuous: while [`is_active`](Self::is_active), one particle every
///   `1 / spawn_rate` seconds of accumulated time
/// - burst: [`burst`](Self::burst) emits N particles immediately
///
/// New systems start inactive, so a burst-only effect never leaks continuous
/// particles.
///
/// # Example
///
/// ```rust
/// use hulu_brawl::game::seeded_rng;
/// use hulu_brawl::math::Vector2;
/// use hulu_brawl::particles::{ParticleConfig, ParticleSystem};
///
/// let mut rng = seeded_rng(1);
/// let mut explosion = ParticleSystem::new(ParticleConfig::explosion(), Vector2::new(800.0, 600.0), &mut rng);
/// explosion.burst(180, &mut rng);
/// assert_eq!(explosion.particle_count(), 180);
///
/// for _ in 0..13 {
///     explosion.update(0.1, &mut rng);
/// }
/// assert_eq!(explosion.particle_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    config: ParticleConfig,
    particles: Vec<Particle>,
    anchor: Vector2,
    active: bool,
    accumulator: f32,
}

impl ParticleSystem {
    /// Creates an inactive system and emits `config.initial_count` particles
    pub fn new(config: ParticleConfig, anchor: Vector2, rng: &mut GameRng) -> Self {
        let mut system = ParticleSystem {
            config,
            particles: Vec::with_capacity(config.max_particles.min(256)),
            anchor,
            active: false,
            accumulator: 0.0,
        };
        for _ in 0..config.initial_count {
            system.emit_one(config.emit, rng);
        }
        system
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn position(&self) -> Vector2 {
        self.anchor
    }

    /// Moves the anchor; live particles keep their own positions
    pub fn set_position(&mut self, anchor: Vector2) {
        self.anchor = anchor;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Gates continuous emission; bursts work either way
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.accumulator = 0.0;
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.accumulator = 0.0;
    }

    /// Emits up to `count` particles from the burst ranges, returning how many fit
    pub fn burst(&mut self, count: usize, rng: &mut GameRng) -> usize {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = count.min(room);
        for _ in 0..count {
            self.emit_one(self.config.burst, rng);
        }
        count
    }

    /// Integrates and culls live particles, then runs continuous emission
    pub fn update(&mut self, delta_time: f32, rng: &mut GameRng) {
        let delta_time = delta_time.max(0.0);

        for particle in &mut self.particles {
            particle.position += particle.velocity * delta_time;
            particle.life -= delta_time;
        }
        self.particles.retain(|p| p.life > 0.0);

        if !self.active || self.config.spawn_rate <= 0.0 {
            return;
        }

        let interval = 1.0 / self.config.spawn_rate;
        self.accumulator += delta_time;
        while self.accumulator >= interval {
            self.accumulator -= interval;
            if self.particles.len() < self.config.max_particles {
                self.emit_one(self.config.emit, rng);
            }
        }
    }

    /// Draws each particle as a disc fading with its remaining life
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for particle in &self.particles {
            let alpha = (particle.life_fraction() * self.config.opacity_multiplier).clamp(0.0, 1.0);
            let size = particle.size.max(self.config.min_render_size);
            renderer.draw_circle(
                particle.position.x,
                particle.position.y,
                size / 2.0,
                12,
                particle.color.with_alpha(alpha),
            );
        }
    }

    fn emit_one(&mut self, ranges: EmissionRanges, rng: &mut GameRng) {
        let angle = rng.gen_range(0.0..TAU);
        let life = ranges.life.sample(rng).max(f32::EPSILON);
        self.particles.push(Particle {
            position: self.anchor,
            velocity: Vector2::from_angle(angle) * ranges.speed.sample(rng),
            life,
            initial_life: life,
            size: ranges.size.sample(rng),
            color: Color::rgb(ranges.red.sample(rng), ranges.green.sample(rng), ranges.blue.sample(rng)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seeded_rng;
    use crate::particles::config::Range;
    use crate::render::{DrawCall, RecordingRenderer};

    fn steady(spawn_rate: f32) -> ParticleConfig {
        let mut config = ParticleConfig::light();
        config.spawn_rate = spawn_rate;
        config.emit.life = Range::fixed(10.0);
        config
    }

    #[test]
    fn test_burst_of_180_then_empty() {
        let mut rng = seeded_rng(11);
        let mut system = ParticleSystem::new(ParticleConfig::explosion(), Vector2::ZERO, &mut rng);

        assert_eq!(system.burst(180, &mut rng), 180);
        assert_eq!(system.particle_count(), 180);

        let mut elapsed = 0.0;
        while elapsed <= ParticleConfig::explosion().max_life() + 0.05 {
            system.update(1.0 / 60.0, &mut rng);
            elapsed += 1.0 / 60.0;
        }
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn test_inactive_system_does_not_emit() {
        let mut rng = seeded_rng(1);
        let mut system = ParticleSystem::new(steady(100.0), Vector2::ZERO, &mut rng);
        system.update(1.0, &mut rng);
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn test_continuous_emits_per_interval() {
        let mut rng = seeded_rng(1);
        let mut system = ParticleSystem::new(steady(10.0), Vector2::ZERO, &mut rng);
        system.set_active(true);

        system.update(0.05, &mut rng);
        assert_eq!(system.particle_count(), 0);
        system.update(0.05, &mut rng);
        assert_eq!(system.particle_count(), 1);

        // One long tick covers several intervals
        system.update(0.35, &mut rng);
        assert_eq!(system.particle_count(), 4);
    }

    #[test]
    fn test_cap_is_never_exceeded() {
        let mut rng = seeded_rng(1);
        let mut config = steady(1000.0);
        config.max_particles = 20;
        let mut system = ParticleSystem::new(config, Vector2::ZERO, &mut rng);
        system.set_active(true);

        system.update(1.0, &mut rng);
        assert_eq!(system.particle_count(), 20);
        assert_eq!(system.burst(50, &mut rng), 0);
    }

    #[test]
    fn test_initial_count_emitted_at_creation() {
        let mut rng = seeded_rng(1);
        let mut config = steady(0.0);
        config.initial_count = 7;
        let system = ParticleSystem::new(config, Vector2::ZERO, &mut rng);
        assert_eq!(system.particle_count(), 7);
    }

    #[test]
    fn test_render_fades_and_respects_min_size() {
        let mut rng = seeded_rng(1);
        let mut config = ParticleConfig::impact();
        config.burst.life = Range::fixed(1.0);
        config.burst.size = Range::fixed(1.0);
        config.min_render_size = 4.0;
        config.opacity_multiplier = 0.5;
        let mut system = ParticleSystem::new(config, Vector2::ZERO, &mut rng);
        system.burst(1, &mut rng);
        system.update(0.5, &mut rng);

        let mut renderer = RecordingRenderer::new(100, 100);
        system.render(&mut renderer);

        match renderer.calls.as_slice() {
            [DrawCall::Circle { radius, color, .. }] => {
                assert_eq!(*radius, 2.0);
                assert!((color.a - 0.25).abs() < 1e-5);
            }
            other => panic!("unexpected draw calls: {:?}", other),
        }
    }
}
