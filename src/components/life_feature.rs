//! Health, invulnerability, and lifetime for an entity
//!
//! The life feature is what makes an entity killable. It also gives transient
//! objects (skill projectiles) a finite lifetime: once the timer reaches its
//! maximum the owner is parked off-stage and the entity is flagged as expired,
//! so the lifecycle phase can deactivate it without deleting anything mid-frame.
//!
//! # Rust Learning Notes
//!
//! - **Option for optional features**: the lifetime timer is `Option<Lifetime>`
//!   rather than a `-1` sentinel
//! - **Saturating math**: health is an `i32` clamped at zero on every write

/// Outcome of applying damage, adapted from the player stats system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// Health actually removed (never more than what was left)
    pub damage_dealt: i32,
    /// True if this hit brought health to zero
    pub is_fatal: bool,
}

/// Result of one lifetime timer step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeTick {
    /// No lifetime, or still counting
    Running,
    /// The timer reached its maximum on this step
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lifetime {
    elapsed: f32,
    max: f32,
    expired: bool,
}

/// Health, invulnerability flags, and an optional lifetime timer
///
/// # Example
///
/// ```rust
/// use hulu_brawl::components::{LifeFeatureComponent, LifetimeTick};
///
/// let mut bolt = LifeFeatureComponent::new(1).with_lifetime(1.0);
/// assert_eq!(bolt.update(0.5), LifetimeTick::Running);
/// assert_eq!(bolt.update(0.5), LifetimeTick::Expired);
/// assert!(bolt.is_lifetime_expired());
/// assert_eq!(bolt.lifetime_elapsed(), Some(0.0)); // timer resets after firing
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LifeFeatureComponent {
    health: i32,
    max_health: i32,
    /// Permanent invulnerability (scenery, debug)
    pub invulnerable: bool,
    invulnerable_for: f32,
    lifetime: Option<Lifetime>,
}

impl LifeFeatureComponent {
    /// Full health, vulnerable, no lifetime
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(0);
        LifeFeatureComponent {
            health: max_health,
            max_health,
            invulnerable: false,
            invulnerable_for: 0.0,
            lifetime: None,
        }
    }

    pub fn with_lifetime(mut self, max_lifetime: f32) -> Self {
        self.set_lifetime(max_lifetime);
        self
    }

    /// Enables the lifetime timer; non-positive values disable it
    pub fn set_lifetime(&mut self, max_lifetime: f32) {
        self.lifetime = if max_lifetime > 0.0 {
            Some(Lifetime {
                elapsed: 0.0,
                max: max_lifetime,
                expired: false,
            })
        } else {
            None
        };
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Sets health directly, clamped into `[0, max_health]`
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Removes health, never going below zero
    ///
    /// Invulnerability is not checked here; callers decide whether a hit lands.
    pub fn take_damage(&mut self, amount: i32) -> DamageResult {
        let amount = amount.max(0);
        let old_health = self.health;
        self.health = old_health.saturating_sub(amount).max(0);

        DamageResult {
            damage_dealt: old_health - self.health,
            is_fatal: self.health == 0 && old_health > 0,
        }
    }

    /// Drops health to zero (used when a projectile lands)
    pub fn consume(&mut self) {
        self.health = 0;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable || self.invulnerable_for > 0.0
    }

    /// Starts (or extends) a timed invulnerability window
    pub fn grant_invulnerability(&mut self, seconds: f32) {
        self.invulnerable_for = self.invulnerable_for.max(seconds);
    }

    pub fn invulnerability_remaining(&self) -> f32 {
        self.invulnerable_for
    }

    pub fn has_lifetime(&self) -> bool {
        self.lifetime.is_some()
    }

    /// Seconds accumulated on the lifetime timer, `None` when disabled
    pub fn lifetime_elapsed(&self) -> Option<f32> {
        self.lifetime.map(|l| l.elapsed)
    }

    pub fn max_lifetime(&self) -> Option<f32> {
        self.lifetime.map(|l| l.max)
    }

    /// True once the lifetime timer has fired at least once
    pub fn is_lifetime_expired(&self) -> bool {
        self.lifetime.is_some_and(|l| l.expired)
    }

    /// Advances the invulnerability window and the lifetime timer by `delta_time`
    ///
    /// Returns [`LifetimeTick::Expired`] on the step the timer reaches its
    /// maximum. The timer then resets to zero and the expired flag stays latched.
    pub fn update(&mut self, delta_time: f32) -> LifetimeTick {
        let delta_time = delta_time.max(0.0);

        if self.invulnerable_for > 0.0 {
            self.invulnerable_for = (self.invulnerable_for - delta_time).max(0.0);
        }

        match self.lifetime.as_mut() {
            Some(lifetime) => {
                lifetime.elapsed += delta_time;
                if lifetime.elapsed >= lifetime.max {
                    lifetime.elapsed = 0.0;
                    lifetime.expired = true;
                    LifetimeTick::Expired
                } else {
                    LifetimeTick::Running
                }
            }
            None => LifetimeTick::Running,
        }
    }
}
