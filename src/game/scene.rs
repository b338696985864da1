//! Game session: one run from level 1 to game over
//!
//! [`GameSession`] composes everything a running game needs:
//! - [`GameRules`] and the registry it owns
//! - [`LevelDirector`] spawning a new wave when the field is cleared
//! - particle effects (player trail, enemy auras, hit/death bursts)
//! - the toggleable [`Recorder`]
//! - the HUD
//!
//! # Frame Flow
//!
//! ```text
//! update(dt, input)
//!   ├─ Quit pressed?              → wants_exit
//!   ├─ game over?                 → count down, freeze particles, wait for a key
//!   ├─ record key?                → toggle recording
//!   ├─ rules.tick(dt, input, rng) → TickOutcome
//!   ├─ recorder.sample(dt)
//!   ├─ bursts for hits and deaths
//!   ├─ player died?               → GameOver
//!   │  or enemies cleared?        → next level, queue its wave
//!   └─ particles update
//! render(renderer)
//!   background → entities → particles → game-over overlay → HUD
//! ```

use crate::config::GameConfig;
use crate::entity::{EntityId, EntityKind};
use crate::game::levels::{self, LevelDirector};
use crate::game::rules::{GameRules, TickOutcome};
use crate::game::{GameRng, clock_seed, seeded_rng};
use crate::input::{InputSnapshot, Key};
use crate::math::Vector2;
use crate::particles::{ParticleConfig, ParticleSystem};
use crate::recording::Recorder;
use crate::render::{Color, Renderer};
use crate::ui::{Hud, HudState, render_game_over};
use std::collections::BTreeMap;

const BACKGROUND: Color = Color::rgb(0.1, 0.1, 0.2);

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Playing,
    /// `elapsed` counts seconds since the player died
    GameOver { elapsed: f32 },
}

pub struct GameSession {
    rules: GameRules,
    levels: LevelDirector,
    rng: GameRng,
    time: f32,
    trail: ParticleSystem,
    // Keyed by handle so iteration order (and with it RNG consumption) is stable
    auras: BTreeMap<EntityId, ParticleSystem>,
    bursts: Vec<ParticleSystem>,
    recorder: Recorder,
    hud: Hud,
    state: SessionState,
    wants_exit: bool,
}

impl GameSession {
    /// Starts a session seeded from `config.seed`, or the clock if unset
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self::with_seed(config, seed)
    }

    /// Starts a session: player at the map centre, scenery, and level 1's wave
    ///
    /// The first wave is inserted immediately so soldiers are live from the
    /// first frame.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        log::info!("starting session (seed {})", seed);
        let mut rng = seeded_rng(seed);
        let center = config.map.center();
        let recorder = Recorder::new(&config.recording);

        let mut rules = GameRules::new(config);
        rules.spawn_player(center);
        levels::place_scenery(&mut rules);

        let levels = LevelDirector::new();
        levels.spawn_wave(&mut rules, &mut rng);
        rules.registry_mut().flush_pending();

        let mut trail = ParticleSystem::new(ParticleConfig::player_trail(), center, &mut rng);
        trail.set_active(true);

        GameSession {
            rules,
            levels,
            rng,
            time: 0.0,
            trail,
            auras: BTreeMap::new(),
            bursts: Vec::new(),
            recorder,
            hud: Hud::new(),
            state: SessionState::Playing,
            wants_exit: false,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Mutable rules for scenario setup between frames
    pub fn rules_mut(&mut self) -> &mut GameRules {
        &mut self.rules
    }

    pub fn level(&self) -> u32 {
        self.levels.level()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver { .. })
    }

    /// True once the host should leave the session (Quit, or a key after game over)
    pub fn wants_exit(&self) -> bool {
        self.wants_exit
    }

    /// Simulated seconds since the session started
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn toggle_recording(&mut self) -> bool {
        self.recorder.toggle()
    }

    pub fn trail(&self) -> &ParticleSystem {
        &self.trail
    }

    pub fn aura_count(&self) -> usize {
        self.auras.len()
    }

    /// One-shot hit and death bursts still alive
    pub fn bursts(&self) -> &[ParticleSystem] {
        &self.bursts
    }

    /// Live particles across every effect
    pub fn particle_count(&self) -> usize {
        self.trail.particle_count()
            + self.auras.values().map(ParticleSystem::particle_count).sum::<usize>()
            + self.bursts.iter().map(ParticleSystem::particle_count).sum::<usize>()
    }

    /// Advances the session by one frame
    ///
    /// Returns what the rule engine reported; during game over the rules no
    /// longer tick and the outcome is empty.
    pub fn update(&mut self, delta_time: f32, input: &InputSnapshot) -> TickOutcome {
        let delta_time = delta_time.max(0.0);
        self.time += delta_time;

        if input.is_key_just_pressed(Key::Quit) {
            self.wants_exit = true;
            return TickOutcome::default();
        }

        if let SessionState::GameOver { elapsed } = &mut self.state {
            *elapsed += delta_time;
        }
        if let SessionState::GameOver { elapsed } = self.state {
            let session = &self.rules.config().session;
            let frozen = elapsed >= session.freeze_delay;
            if elapsed >= session.return_cooldown && input.any_key_just_pressed() {
                log::info!("leaving session after game over");
                self.wants_exit = true;
            }
            self.recorder.sample(delta_time, self.rules.registry());
            if !frozen {
                self.update_particles(delta_time);
            }
            return TickOutcome::default();
        }

        if input.is_key_just_pressed(Key::ToggleRecording) {
            self.recorder.toggle();
        }

        let outcome = self.rules.tick(delta_time, input, &mut self.rng);
        self.recorder.sample(delta_time, self.rules.registry());
        self.spawn_bursts(&outcome);

        if outcome.player_died {
            log::info!("player died on level {} at t={:.2}s", self.levels.level(), self.time);
            self.state = SessionState::GameOver { elapsed: 0.0 };
        } else if outcome.enemies_cleared {
            self.levels.advance();
            self.levels.spawn_wave(&mut self.rules, &mut self.rng);
        }

        self.update_particles(delta_time);
        outcome
    }

    /// Draws the frame from committed state
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let map = &self.rules.config().map;
        renderer.draw_rect(0.0, 0.0, map.width, map.height, BACKGROUND);

        for entity in self.rules.registry().iter_active() {
            entity.render(renderer);
        }

        self.trail.render(renderer);
        for aura in self.auras.values() {
            aura.render(renderer);
        }
        for burst in &self.bursts {
            burst.render(renderer);
        }

        if self.is_game_over() {
            render_game_over(renderer);
        }

        let state = HudState {
            level: self.levels.level(),
            player_health: self.rules.player().map(|_| self.rules.player_health()),
            skill_cooldown: self.rules.skill_cooldown_percentage(),
        };
        self.hud.render(renderer, &state);
    }

    fn spawn_bursts(&mut self, outcome: &TickOutcome) {
        let session = self.rules.config().session.clone();
        let player = self.rules.player_id();

        for hit in outcome.hits.iter().filter(|hit| !hit.fatal) {
            self.burst(ParticleConfig::impact(), hit.position, session.impact_burst_count);
        }
        for death in &outcome.deaths {
            let count = if Some(death.id) == player {
                session.explosion_count
            } else {
                session.death_burst_count
            };
            self.burst(ParticleConfig::explosion(), death.position, count);
        }
    }

    fn burst(&mut self, config: ParticleConfig, position: Vector2, count: u32) {
        let mut system = ParticleSystem::new(config, position, &mut self.rng);
        system.burst(count as usize, &mut self.rng);
        self.bursts.push(system);
    }

    /// Trail follows the player, auras follow living enemies, bursts fade out
    fn update_particles(&mut self, delta_time: f32) {
        let rng = &mut self.rng;

        match self.rules.player_position() {
            Some(position) => self.trail.set_position(position),
            None => self.trail.set_active(false),
        }
        self.trail.update(delta_time, rng);

        let enemies: Vec<(EntityId, Vector2)> = self
            .rules
            .registry()
            .iter_active()
            .filter(|e| matches!(e.kind(), EntityKind::EnemySoldier | EntityKind::EnemyKing))
            .filter_map(|e| Some((e.id(), e.position()?)))
            .collect();

        self.auras
            .retain(|id, _| enemies.iter().any(|(enemy, _)| enemy == id));
        for (id, position) in enemies {
            let aura = self.auras.entry(id).or_insert_with(|| {
                let mut aura = ParticleSystem::new(ParticleConfig::light(), position, rng);
                aura.set_active(true);
                aura
            });
            aura.set_position(position);
            aura.update(delta_time, rng);
        }

        for burst in &mut self.bursts {
            burst.update(delta_time, rng);
        }
        self.bursts.retain(|burst| !burst.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::LifeFeatureComponent;
    use crate::game::prefabs;
    use crate::input::InputState;
    use crate::render::RecordingRenderer;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        GameSession::with_seed(GameConfig::default(), 7)
    }

    /// Drops the player to 1 HP and parks a soldier on top of it
    fn doom_player(session: &mut GameSession) {
        let config = session.rules().config().clone();
        let rules = session.rules_mut();
        let player = rules.player_id().unwrap();
        let position = rules.player_position().unwrap();
        if let Some(life) = rules
            .registry_mut()
            .get_mut(player)
            .and_then(|p| p.get_mut::<LifeFeatureComponent>())
        {
            life.set_health(1);
        }
        rules
            .registry_mut()
            .add(prefabs::enemy_soldier(&config, position, Vector2::ZERO));
    }

    #[test]
    fn test_session_starts_on_level_one() {
        let session = session();
        let registry = session.rules().registry();

        assert_eq!(session.level(), 1);
        assert_eq!(registry.count_active(|e| e.kind() == EntityKind::EnemySoldier), 6);
        assert_eq!(registry.count_active(|e| e.kind() == EntityKind::Neutral), 3);
        assert_eq!(session.rules().player_position(), Some(Vector2::new(800.0, 600.0)));
        assert!(session.trail().is_active());
    }

    #[test]
    fn test_auras_follow_living_enemies() {
        let mut session = session();
        session.update(DT, &InputSnapshot::empty());
        assert_eq!(session.aura_count(), 6);

        let soldier = session
            .rules()
            .registry()
            .find_first(EntityKind::EnemySoldier)
            .map(|e| e.id())
            .unwrap();
        if let Some(entity) = session.rules_mut().registry_mut().get_mut(soldier) {
            entity.deactivate();
        }
        session.update(DT, &InputSnapshot::empty());
        assert_eq!(session.aura_count(), 5);
    }

    #[test]
    fn test_quit_requests_exit() {
        let mut session = session();
        let mut input = InputState::new();
        input.key_down(Key::Quit);

        session.update(DT, &input.snapshot());
        assert!(session.wants_exit());
    }

    #[test]
    fn test_player_death_explodes_and_freezes() {
        let mut session = session();
        doom_player(&mut session);

        let outcome = session.update(DT, &InputSnapshot::empty());
        assert!(outcome.player_died);
        assert!(session.is_game_over());
        let explosion: usize = session.bursts().iter().map(ParticleSystem::particle_count).sum();
        assert_eq!(explosion, 180);

        // Past the freeze delay nothing moves any more
        for _ in 0..20 {
            session.update(DT, &InputSnapshot::empty());
        }
        let before: Vec<Vector2> = session.bursts()[0].particles().iter().map(|p| p.position).collect();
        session.update(DT, &InputSnapshot::empty());
        let after: Vec<Vector2> = session.bursts()[0].particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_key_returns_only_after_cooldown() {
        let mut session = session();
        doom_player(&mut session);
        session.update(DT, &InputSnapshot::empty());
        assert!(session.is_game_over());

        let mut input = InputState::new();
        input.key_down(Key::Other(32));
        session.update(DT, &input.snapshot());
        assert!(!session.wants_exit());

        for _ in 0..20 {
            session.update(DT, &InputSnapshot::empty());
        }
        input.begin_frame();
        input.key_up(Key::Other(32));
        input.key_down(Key::Other(32));
        session.update(DT, &input.snapshot());
        assert!(session.wants_exit());
    }

    #[test]
    fn test_clearing_the_field_advances_level() {
        let mut session = session();
        for entity in session.rules_mut().registry_mut().iter_active_mut() {
            if entity.kind().is_enemy() {
                entity.deactivate();
            }
        }

        let outcome = session.update(DT, &InputSnapshot::empty());
        assert!(outcome.enemies_cleared);
        assert_eq!(session.level(), 2);

        // The king joins on the next tick and fires once it has updated
        session.update(DT, &InputSnapshot::empty());
        let registry = session.rules().registry();
        assert_eq!(registry.count_active(|e| e.kind() == EntityKind::EnemyKing), 1);
        assert_eq!(registry.count_active(|e| e.kind() == EntityKind::EnemySkill), 5);
    }

    #[test]
    fn test_render_draws_background_first_and_hud() {
        let session = session();
        let mut renderer = RecordingRenderer::new(1600, 1200);
        session.render(&mut renderer);

        assert_eq!(
            renderer.calls[0],
            crate::render::DrawCall::Rect {
                x: 0.0,
                y: 0.0,
                width: 1600.0,
                height: 1200.0,
                color: BACKGROUND
            }
        );
        assert!(renderer.texts().contains(&"Level: 1"));
        assert!(renderer.texts().contains(&"100 / 100"));
        assert!(!renderer.texts().contains(&"GAME OVER"));
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = session();
        let mut b = session();
        for _ in 0..120 {
            a.update(DT, &InputSnapshot::empty());
            b.update(DT, &InputSnapshot::empty());
        }
        let positions = |s: &GameSession| -> Vec<Option<Vector2>> {
            s.rules().registry().iter_active().map(|e| e.position()).collect()
        };
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.particle_count(), b.particle_count());
    }
}
