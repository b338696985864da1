/// Periodic volley pattern for an entity that shoots on its own
///
/// The king carries one of these. The enemy attack phase advances the timer;
/// every `period` seconds a volley of `volley_size` projectiles is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponComponent {
    pub period: f32,
    pub volley_size: u32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_friction: f32,
    /// Half-angle of the fan in radians
    pub spread: f32,
    /// Spawn offset range around the shooter (total width, centred)
    pub jitter: f32,
    elapsed: f32,
    volleys_fired: u32,
}

impl WeaponComponent {
    pub fn new(period: f32, volley_size: u32) -> Self {
        WeaponComponent {
            period: period.max(f32::EPSILON),
            volley_size,
            projectile_speed: 220.0,
            projectile_lifetime: 2.0,
            projectile_friction: 0.98,
            spread: 0.6,
            jitter: 20.0,
            elapsed: 0.0,
            volleys_fired: 0,
        }
    }

    pub fn with_projectile(mut self, speed: f32, lifetime: f32, spread: f32) -> Self {
        self.projectile_speed = speed;
        self.projectile_lifetime = lifetime;
        self.spread = spread;
        self
    }

    /// Advances the timer; returns true when a volley is due this tick
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time.max(0.0);
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }

    pub fn record_volley(&mut self) {
        self.volleys_fired += 1;
    }

    pub fn volleys_fired(&self) -> u32 {
        self.volleys_fired
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
