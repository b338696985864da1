/// Player skill cooldown state machine
///
/// ```text
///   Idle ──advance──▶ Cooldown ──elapsed ≥ total──▶ Ready
///                        ▲                            │
///                        └────────── fire ────────────┘
/// ```
///
/// `Idle` is the state before the first tick. Firing is only allowed in
/// `Ready` and puts the machine back in `Cooldown` with the timer at zero.
/// The tick that fires does not advance the timer, so the cooldown
/// percentage reads exactly 0 on that tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    Idle,
    Cooldown,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillCooldown {
    state: CooldownState,
    elapsed: f32,
    total: f32,
}

impl SkillCooldown {
    pub fn new(total: f32) -> Self {
        SkillCooldown {
            state: CooldownState::Idle,
            elapsed: 0.0,
            total: total.max(f32::EPSILON),
        }
    }

    pub fn state(&self) -> CooldownState {
        self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    /// Advances the timer by `delta_time`
    pub fn advance(&mut self, delta_time: f32) {
        match self.state {
            CooldownState::Idle => {
                self.state = CooldownState::Cooldown;
                self.accumulate(delta_time);
            }
            CooldownState::Cooldown => self.accumulate(delta_time),
            CooldownState::Ready => {}
        }
    }

    fn accumulate(&mut self, delta_time: f32) {
        self.elapsed = (self.elapsed + delta_time.max(0.0)).min(self.total);
        if self.elapsed >= self.total {
            self.state = CooldownState::Ready;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == CooldownState::Ready
    }

    /// Fires if ready; returns whether the skill went off
    pub fn try_fire(&mut self) -> bool {
        if self.is_ready() {
            self.state = CooldownState::Cooldown;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// `clamp(elapsed / total, 0, 1)`
    pub fn percentage(&self) -> f32 {
        (self.elapsed / self.total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_and_not_ready() {
        let mut cooldown = SkillCooldown::new(1.0);
        assert_eq!(cooldown.state(), CooldownState::Idle);
        assert!(!cooldown.try_fire());
        assert_eq!(cooldown.percentage(), 0.0);
    }

    #[test]
    fn test_reaches_one_exactly_at_total() {
        let mut cooldown = SkillCooldown::new(1.0);
        for _ in 0..4 {
            cooldown.advance(0.25);
        }
        assert_eq!(cooldown.percentage(), 1.0);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_fire_resets_to_zero() {
        let mut cooldown = SkillCooldown::new(0.5);
        cooldown.advance(0.5);
        assert!(cooldown.try_fire());
        assert_eq!(cooldown.state(), CooldownState::Cooldown);
        assert_eq!(cooldown.percentage(), 0.0);
        assert!(!cooldown.try_fire());
    }

    #[test]
    fn test_percentage_is_monotonic_while_cooling() {
        let mut cooldown = SkillCooldown::new(1.0);
        let mut last = cooldown.percentage();
        for _ in 0..30 {
            cooldown.advance(0.07);
            let now = cooldown.percentage();
            assert!(now >= last);
            assert!(now <= 1.0);
            last = now;
        }
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut cooldown = SkillCooldown::new(1.0);
        cooldown.advance(5.0);
        assert_eq!(cooldown.elapsed(), 1.0);
        assert_eq!(cooldown.percentage(), 1.0);
    }
}
