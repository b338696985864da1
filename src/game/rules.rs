//! The per-tick rule pipeline
//!
//! [`GameRules::tick`] runs these phases in a fixed order. The order is part
//! of the contract: moving a phase changes what the others observe.
//!
//! | # | Phase                    | Reads                    | Writes                        |
//! |---|--------------------------|--------------------------|-------------------------------|
//! | 0 | `update_entities`        | components               | timers, kind hooks (spawns)   |
//! | 1 | `handle_player_input`    | input snapshot           | player velocity, fire request |
//! | 2 | `update_physics`         | velocity, friction       | position, velocity            |
//! | 3 | `update_enemy_movement`  | player position          | enemy velocity                |
//! | 4 | `update_attack`          | fire request, cooldown   | cooldown, player bolts        |
//! | 5 | `update_enemy_attack`    | weapons                  | enemy volleys                 |
//! | 6 | `check_entity_alive`     | health, lifetime         | active flags                  |
//! | 7 | `check_ai_collisions`    | positions                | health, active flags          |
//! | 8 | `check_enemies_died`     | active enemies           | nothing                       |
//!
//! Spawns made during the tick sit in the registry's pending queue. The queue
//! is flushed at the start of a tick and again after cleanup at the end.

use crate::components::{DamageResult, LifeFeatureComponent, PhysicsComponent, TransformComponent, WeaponComponent};
use crate::config::GameConfig;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::game::behavior::UpdateContext;
use crate::game::collision::{self, Collider};
use crate::game::cooldown::SkillCooldown;
use crate::game::{GameRng, prefabs};
use crate::input::{InputSnapshot, Key};
use crate::math::Vector2;
use crate::registry::EntityRegistry;
use std::collections::HashSet;

/// A hit that landed during the combat phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub attacker: EntityId,
    pub target: EntityId,
    pub target_kind: EntityKind,
    pub position: Vector2,
    pub damage: i32,
    pub fatal: bool,
}

/// An entity that died (health reached zero) this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Death {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vector2,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub hits: Vec<Hit>,
    pub deaths: Vec<Death>,
    pub skill_fired: bool,
    pub player_died: bool,
    /// Result of `check_enemies_died`
    pub enemies_cleared: bool,
    /// Entities dropped at the cleanup point
    pub removed: usize,
}

/// Owns the registry and runs the phase pipeline
#[derive(Debug)]
pub struct GameRules {
    config: GameConfig,
    registry: EntityRegistry,
    player: Option<EntityId>,
    cooldown: SkillCooldown,
    fire_requested: bool,
}

impl GameRules {
    pub fn new(config: GameConfig) -> Self {
        let cooldown = SkillCooldown::new(config.player.skill_cooldown);
        GameRules {
            config,
            registry: EntityRegistry::new(),
            player: None,
            cooldown,
            fire_requested: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable access for scenario setup; never call during a tick
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Adds the player immediately and remembers its handle
    pub fn spawn_player(&mut self, position: Vector2) -> EntityId {
        let id = self.registry.add(prefabs::player(&self.config, position));
        self.player = Some(id);
        id
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// The player entity, if it is still alive
    pub fn player(&self) -> Option<&Entity> {
        self.player
            .and_then(|id| self.registry.get(id))
            .filter(|e| e.is_active())
    }

    pub fn player_position(&self) -> Option<Vector2> {
        self.player().and_then(Entity::position)
    }

    /// `(current, max)` health of the player; `(0, max)` once dead
    pub fn player_health(&self) -> (i32, i32) {
        match self.player().and_then(|p| p.get::<LifeFeatureComponent>()) {
            Some(life) => (life.health(), life.max_health()),
            None => (0, self.config.player.health),
        }
    }

    pub fn cooldown(&self) -> &SkillCooldown {
        &self.cooldown
    }

    /// `clamp(elapsed / total, 0, 1)` of the player skill
    pub fn skill_cooldown_percentage(&self) -> f32 {
        self.cooldown.percentage()
    }

    /// Runs one full tick
    pub fn tick(&mut self, delta_time: f32, input: &InputSnapshot, rng: &mut GameRng) -> TickOutcome {
        let delta_time = delta_time.max(0.0);
        let mut outcome = TickOutcome::default();

        self.registry.flush_pending();

        self.update_entities(delta_time, rng);
        self.handle_player_input(input);
        self.update_physics(delta_time);
        self.update_enemy_movement(delta_time);
        outcome.skill_fired = self.update_attack(delta_time, rng);
        self.update_enemy_attack(delta_time, rng);
        self.check_entity_alive(&mut outcome);
        self.check_ai_collisions(delta_time, &mut outcome);
        outcome.enemies_cleared = self.check_enemies_died();

        outcome.removed = self.registry.remove_inactive();
        self.registry.flush_pending();

        outcome
    }

    /// Phase 0: generic component update plus each kind's update hook
    pub fn update_entities(&mut self, delta_time: f32, rng: &mut GameRng) {
        let mut ctx = UpdateContext {
            delta_time,
            rng,
            player_position: self.player_position(),
        };
        self.registry
            .for_each_active_mut(|entity, spawner| entity.update(spawner, &mut ctx));
    }

    /// Phase 1: WASD sets the player's velocity, J requests a skill cast
    ///
    /// With no movement keys held the velocity is left alone and friction
    /// brings the player to rest.
    pub fn handle_player_input(&mut self, input: &InputSnapshot) {
        self.fire_requested = input.is_key_down(Key::Skill);

        let axis = input.movement_axis();
        if axis.is_zero() {
            return;
        }
        let speed = self.config.player.speed;
        let Some(id) = self.player else {
            return;
        };
        if let Some(physics) = self
            .registry
            .get_mut(id)
            .filter(|e| e.is_active())
            .and_then(|e| e.get_mut::<PhysicsComponent>())
        {
            physics.velocity = axis.normalized() * speed;
        }
    }

    /// Phase 2: exactly one integration per entity with transform + physics
    pub fn update_physics(&mut self, delta_time: f32) {
        let epsilon = self.config.physics.velocity_epsilon;
        let (width, height) = (self.config.map.width, self.config.map.height);

        for entity in self.registry.iter_active_mut() {
            let (Some(mut physics), Some(mut transform)) = (
                entity.get::<PhysicsComponent>().copied(),
                entity.get::<TransformComponent>().copied(),
            ) else {
                continue;
            };

            physics.integrate(&mut transform.position, delta_time, epsilon);
            if entity.kind().is_body() {
                transform.keep_in_bounds(width, height);
            }

            entity.add_component(physics);
            entity.add_component(transform);
        }
    }

    /// Phase 3: enemies steer toward the player at a bounded speed
    pub fn update_enemy_movement(&mut self, delta_time: f32) {
        let Some(target) = self.player_position() else {
            return;
        };
        let acceleration = self.config.pursuit.acceleration;
        let soldier_speed = self.config.soldier.pursuit_speed;
        let king_speed = self.config.king.pursuit_speed;

        for entity in self.registry.iter_active_mut() {
            let max_speed = match entity.kind() {
                EntityKind::EnemySoldier => soldier_speed,
                EntityKind::EnemyKing => king_speed,
                _ => continue,
            };
            let Some(position) = entity.position() else {
                continue;
            };
            if let Some(physics) = entity.get_mut::<PhysicsComponent>() {
                let direction = (target - position).normalized();
                let steered = physics.velocity + direction * (acceleration * delta_time);
                physics.velocity = steered.clamp_length(max_speed);
            }
        }
    }

    /// Phase 4: skill cooldown state machine and player bolts
    ///
    /// Returns true when the skill fired. The firing tick does not advance the
    /// cooldown, so its percentage reads exactly zero afterwards.
    pub fn update_attack(&mut self, delta_time: f32, rng: &mut GameRng) -> bool {
        let requested = std::mem::take(&mut self.fire_requested);
        let caster = self.player_position();

        match caster {
            Some(caster) if requested && self.cooldown.try_fire() => {
                for bolt in prefabs::player_bolts(&self.config, caster, rng) {
                    self.registry.queue(bolt);
                }
                log::debug!("player skill fired at {:?}", caster);
                true
            }
            _ => {
                self.cooldown.advance(delta_time);
                false
            }
        }
    }

    /// Phase 5: armed enemies fire a volley every weapon period
    ///
    /// The opening volley belongs to the kind's update hook; this phase only
    /// handles the periodic ones that follow.
    pub fn update_enemy_attack(&mut self, delta_time: f32, rng: &mut GameRng) {
        let target = self.player_position();

        self.registry.for_each_active_mut(|entity, spawner| {
            let Some(origin) = entity.position() else {
                return;
            };
            let Some(weapon) = entity.get_mut::<WeaponComponent>() else {
                return;
            };
            if weapon.volleys_fired() == 0 || !weapon.advance(delta_time) {
                return;
            }
            for projectile in prefabs::enemy_volley(origin, weapon, target, rng) {
                spawner.spawn(projectile);
            }
            weapon.record_volley();
        });
    }

    /// Phase 6: deactivates dead entities and expired projectiles
    pub fn check_entity_alive(&mut self, outcome: &mut TickOutcome) {
        let player = self.player;
        for entity in self.registry.iter_active_mut() {
            if !entity.is_spent() {
                continue;
            }
            entity.deactivate();

            let killed = entity.health().is_some_and(|h| h <= 0);
            if killed && !entity.kind().is_projectile() {
                outcome.deaths.push(Death {
                    id: entity.id(),
                    kind: entity.kind(),
                    position: entity.position().unwrap_or_default(),
                });
                if Some(entity.id()) == player {
                    outcome.player_died = true;
                }
            }
        }
    }

    /// Phase 7: resolves contacts between the player side and the enemy side
    ///
    /// - player vs soldier/king: the player takes the enemy's contact damage
    /// - player vs enemy arrow: the player takes the arrow's damage, the arrow is spent
    /// - player bolt vs soldier/king: the enemy takes the bolt's damage, the bolt is spent
    ///
    /// Each entity is struck at most once per tick. Entities already at zero
    /// health, inactive, or invulnerable are skipped. A struck player gains a
    /// short invulnerability window.
    pub fn check_ai_collisions(&mut self, _delta_time: f32, outcome: &mut TickOutcome) {
        let colliders: Vec<Collider> = self
            .registry
            .iter_active()
            .filter(|e| e.health().is_some_and(|h| h > 0))
            .filter_map(|e| {
                Some(Collider {
                    id: e.id(),
                    kind: e.kind(),
                    layer: e.kind().collision_layer()?,
                    position: e.position()?,
                })
            })
            .collect();

        let mut struck: HashSet<EntityId> = HashSet::new();
        let mut spent: HashSet<EntityId> = HashSet::new();

        for (i, j) in collision::find_contacts(&colliders, self.config.collision.hit_distance) {
            let (player_side, enemy_side) = (colliders[i], colliders[j]);

            let (attacker, target, damage) = match (player_side.kind, enemy_side.kind) {
                (EntityKind::Player, EntityKind::EnemySkill) => {
                    (enemy_side, player_side, self.config.king_weapon.damage)
                }
                (EntityKind::Player, kind) => (enemy_side, player_side, self.contact_damage(kind)),
                (EntityKind::PlayerSkill, _) => (player_side, enemy_side, self.config.player.bolt_damage),
                _ => continue,
            };

            if struck.contains(&target.id) || spent.contains(&attacker.id) {
                continue;
            }
            let Some(result) = self.strike(target.id, damage) else {
                continue;
            };
            struck.insert(target.id);

            if attacker.kind.is_projectile() {
                spent.insert(attacker.id);
                if let Some(projectile) = self.registry.get_mut(attacker.id) {
                    if let Some(life) = projectile.get_mut::<LifeFeatureComponent>() {
                        life.consume();
                    }
                    projectile.deactivate();
                }
            }

            outcome.hits.push(Hit {
                attacker: attacker.id,
                target: target.id,
                target_kind: target.kind,
                position: target.position,
                damage: result.damage_dealt,
                fatal: result.is_fatal,
            });

            if result.is_fatal {
                if let Some(entity) = self.registry.get_mut(target.id) {
                    entity.deactivate();
                }
                outcome.deaths.push(Death {
                    id: target.id,
                    kind: target.kind,
                    position: target.position,
                });
                if Some(target.id) == self.player {
                    outcome.player_died = true;
                }
            }
        }
    }

    /// Phase 8: true iff no soldier or king is active
    pub fn check_enemies_died(&self) -> bool {
        self.registry.count_active(|e| e.kind().is_enemy()) == 0
    }

    fn contact_damage(&self, kind: EntityKind) -> i32 {
        match kind {
            EntityKind::EnemyKing => self.config.king.contact_damage,
            _ => self.config.soldier.contact_damage,
        }
    }

    /// Applies damage unless the target is gone, dead, or invulnerable
    fn strike(&mut self, target: EntityId, damage: i32) -> Option<DamageResult> {
        let is_player = Some(target) == self.player;
        let invulnerability = self.config.player.invulnerability;

        let entity = self.registry.get_mut(target).filter(|e| e.is_active())?;
        let life = entity.get_mut::<LifeFeatureComponent>()?;
        if !life.is_alive() || life.is_invulnerable() {
            return None;
        }

        let result = life.take_damage(damage);
        if is_player && !result.is_fatal {
            life.grant_invulnerability(invulnerability);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seeded_rng;
    use crate::input::InputState;

    fn rules() -> GameRules {
        GameRules::new(GameConfig::default())
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::empty()
    }

    #[test]
    fn test_enemies_died_six_of_six() {
        let mut rules = rules();
        let config = rules.config().clone();
        let ids: Vec<EntityId> = (0..6)
            .map(|i| {
                rules.registry_mut().add(prefabs::enemy_soldier(
                    &config,
                    Vector2::new(100.0 * i as f32, 100.0),
                    Vector2::ZERO,
                ))
            })
            .collect();

        for id in &ids[..5] {
            if let Some(soldier) = rules.registry_mut().get_mut(*id) {
                soldier.deactivate();
            }
        }
        assert!(!rules.check_enemies_died());

        if let Some(soldier) = rules.registry_mut().get_mut(ids[5]) {
            soldier.deactivate();
        }
        assert!(rules.check_enemies_died());
    }

    #[test]
    fn test_enemy_projectiles_do_not_count_as_enemies() {
        let mut rules = rules();
        let weapon = WeaponComponent::new(3.0, 1);
        let mut rng = seeded_rng(0);
        for arrow in prefabs::enemy_volley(Vector2::ZERO, &weapon, None, &mut rng) {
            rules.registry_mut().add(arrow);
        }
        assert!(rules.check_enemies_died());
    }

    #[test]
    fn test_input_moves_player_diagonally_at_speed() {
        let mut rules = rules();
        let player = rules.spawn_player(Vector2::new(800.0, 600.0));
        let mut input = InputState::new();
        input.key_down(Key::MoveRight);
        input.key_down(Key::MoveDown);

        rules.handle_player_input(&input.snapshot());
        let velocity = rules.registry().get(player).and_then(Entity::velocity).unwrap();
        assert!((velocity.length() - rules.config().player.speed).abs() < 1e-3);
        assert!(velocity.x > 0.0 && velocity.y > 0.0);
    }

    #[test]
    fn test_physics_clamps_bodies_to_map() {
        let mut rules = rules();
        let player = rules.spawn_player(Vector2::new(5.0, 5.0));
        if let Some(physics) = rules
            .registry_mut()
            .get_mut(player)
            .and_then(|e| e.get_mut::<PhysicsComponent>())
        {
            physics.velocity = Vector2::new(-1000.0, -1000.0);
        }

        rules.update_physics(1.0);
        assert_eq!(rules.player_position(), Some(Vector2::ZERO));
    }

    #[test]
    fn test_cooldown_zero_on_fire_tick() {
        let mut rules = rules();
        rules.spawn_player(Vector2::new(800.0, 600.0));
        let mut rng = seeded_rng(1);
        let mut input = InputState::new();
        input.key_down(Key::Skill);
        let held = input.snapshot();

        // First tick starts the cooldown; nothing fires until it is full
        let mut fired_at = None;
        for tick in 0..20 {
            let outcome = rules.tick(0.1, &held, &mut rng);
            if outcome.skill_fired {
                fired_at = Some(tick);
                assert_eq!(rules.skill_cooldown_percentage(), 0.0);
                break;
            }
        }
        assert!(fired_at.is_some());

        // Two bolts are live after the firing tick
        let bolts = rules.registry().count_active(|e| e.kind() == EntityKind::PlayerSkill);
        assert_eq!(bolts, 2);
    }

    #[test]
    fn test_pursuit_speed_is_bounded() {
        let mut rules = rules();
        rules.spawn_player(Vector2::new(800.0, 600.0));
        let config = rules.config().clone();
        let soldier = rules.registry_mut().add(prefabs::enemy_soldier(
            &config,
            Vector2::new(100.0, 100.0),
            Vector2::ZERO,
        ));

        for _ in 0..100 {
            rules.update_enemy_movement(0.1);
        }
        let velocity = rules.registry().get(soldier).and_then(Entity::velocity).unwrap();
        assert!(velocity.length() <= config.soldier.pursuit_speed + 1e-3);
        assert!(velocity.x > 0.0 && velocity.y > 0.0);
    }

    #[test]
    fn test_enemy_holds_velocity_without_player() {
        let mut rules = rules();
        let config = rules.config().clone();
        let soldier = rules.registry_mut().add(prefabs::enemy_soldier(
            &config,
            Vector2::new(100.0, 100.0),
            Vector2::new(30.0, 0.0),
        ));

        rules.update_enemy_movement(0.1);
        let velocity = rules.registry().get(soldier).and_then(Entity::velocity);
        assert_eq!(velocity, Some(Vector2::new(30.0, 0.0)));
    }

    #[test]
    fn test_contact_hits_player_once_per_tick() {
        let mut rules = rules();
        let player = rules.spawn_player(Vector2::new(800.0, 600.0));
        let config = rules.config().clone();
        for _ in 0..3 {
            rules.registry_mut().add(prefabs::enemy_soldier(
                &config,
                Vector2::new(805.0, 600.0),
                Vector2::ZERO,
            ));
        }

        let mut outcome = TickOutcome::default();
        rules.check_ai_collisions(0.016, &mut outcome);

        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(outcome.hits[0].target, player);
        assert_eq!(rules.player_health().0, 100 - config.soldier.contact_damage);

        // Invulnerability window blocks the next tick's contact
        let mut next = TickOutcome::default();
        rules.check_ai_collisions(0.016, &mut next);
        assert!(next.hits.is_empty());
    }

    #[test]
    fn test_bolt_damages_enemy_and_is_spent() {
        let mut rules = rules();
        let config = rules.config().clone();
        let soldier = rules.registry_mut().add(prefabs::enemy_soldier(
            &config,
            Vector2::new(300.0, 300.0),
            Vector2::ZERO,
        ));
        let mut rng = seeded_rng(4);
        let bolts = prefabs::player_bolts(&config, Vector2::new(300.0, 300.0), &mut rng);
        let bolt_ids: Vec<EntityId> = bolts.into_iter().map(|b| rules.registry_mut().add(b)).collect();

        let mut outcome = TickOutcome::default();
        rules.check_ai_collisions(0.016, &mut outcome);

        // Two bolts overlap the soldier but it can only be struck once
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(rules.registry().get(soldier).and_then(Entity::health), Some(90));
        let live_bolts = bolt_ids
            .iter()
            .filter(|id| rules.registry().get(**id).is_some_and(Entity::is_active))
            .count();
        assert_eq!(live_bolts, 1);
    }

    #[test]
    fn test_dead_entity_skipped_in_same_tick() {
        let mut rules = rules();
        let config = rules.config().clone();
        let soldier = rules.registry_mut().add(prefabs::enemy_soldier(
            &config,
            Vector2::new(300.0, 300.0),
            Vector2::ZERO,
        ));
        if let Some(life) = rules
            .registry_mut()
            .get_mut(soldier)
            .and_then(|e| e.get_mut::<LifeFeatureComponent>())
        {
            life.set_health(0);
        }
        let mut rng = seeded_rng(4);
        for bolt in prefabs::player_bolts(&config, Vector2::new(300.0, 300.0), &mut rng) {
            rules.registry_mut().add(bolt);
        }

        let mut outcome = TickOutcome::default();
        rules.check_entity_alive(&mut outcome);
        rules.check_ai_collisions(0.016, &mut outcome);

        assert_eq!(outcome.deaths.len(), 1);
        assert!(outcome.hits.is_empty());
    }

    #[test]
    fn test_fatal_hit_reports_player_death() {
        let mut rules = rules();
        let player = rules.spawn_player(Vector2::new(800.0, 600.0));
        if let Some(life) = rules
            .registry_mut()
            .get_mut(player)
            .and_then(|e| e.get_mut::<LifeFeatureComponent>())
        {
            life.set_health(3);
        }
        let config = rules.config().clone();
        rules.registry_mut().add(prefabs::enemy_soldier(
            &config,
            Vector2::new(800.0, 600.0),
            Vector2::ZERO,
        ));

        let mut rng = seeded_rng(0);
        let outcome = rules.tick(0.016, &idle(), &mut rng);
        assert!(outcome.player_died);
        assert!(rules.player().is_none());
        assert_eq!(rules.player_health().0, 0);
    }

    #[test]
    fn test_expired_bolts_removed_at_cleanup() {
        let mut rules = rules();
        let config = rules.config().clone();
        let mut rng = seeded_rng(2);
        for bolt in prefabs::player_bolts(&config, Vector2::new(800.0, 600.0), &mut rng) {
            rules.registry_mut().add(bolt);
        }

        let mut removed = 0;
        for _ in 0..12 {
            removed += rules.tick(0.1, &idle(), &mut rng).removed;
        }
        assert_eq!(removed, 2);
        assert!(rules.registry().is_empty());
    }
}
