//! Entity constructors
//!
//! Every entity the game creates is assembled here from components, so the
//! rule engine and level setup never hand-build component sets.

use crate::components::{
    LifeFeatureComponent, PhysicsComponent, RenderDescriptor, Shape, TransformComponent, WeaponComponent,
};
use crate::config::{GameConfig, WeaponConfig};
use crate::entity::{Entity, EntityKind};
use crate::game::GameRng;
use crate::math::Vector2;
use crate::render::Color;
use rand::Rng;

pub fn player(config: &GameConfig, position: Vector2) -> Entity {
    Entity::new(EntityKind::Player)
        .with(TransformComponent::new(position))
        .with(PhysicsComponent::new(config.player.friction))
        .with(LifeFeatureComponent::new(config.player.health))
        .with(RenderDescriptor::new(
            Shape::Circle,
            Vector2::new(12.0, 12.0),
            Color::rgb(1.0, 0.5, 0.0),
        ))
}

pub fn enemy_soldier(config: &GameConfig, position: Vector2, velocity: Vector2) -> Entity {
    Entity::new(EntityKind::EnemySoldier)
        .with(TransformComponent::new(position))
        .with(PhysicsComponent::new(config.soldier.friction).with_velocity(velocity))
        .with(LifeFeatureComponent::new(config.soldier.health))
        .with(RenderDescriptor::new(
            Shape::Rectangle,
            Vector2::new(20.0, 40.0),
            Color::rgb(0.2, 0.6, 0.2),
        ))
}

/// The king spawns unarmed-looking: its weapon fires on the first update
pub fn enemy_king(config: &GameConfig, position: Vector2) -> Entity {
    Entity::new(EntityKind::EnemyKing)
        .with(TransformComponent::new(position))
        .with(PhysicsComponent::new(config.king.friction))
        .with(LifeFeatureComponent::new(config.king.health))
        .with(king_weapon(&config.king_weapon, config.physics.projectile_friction))
        .with(RenderDescriptor::new(
            Shape::Rectangle,
            Vector2::new(20.0, 30.0),
            Color::rgb(0.8, 0.2, 0.2),
        ))
}

fn king_weapon(weapon: &WeaponConfig, friction: f32) -> WeaponComponent {
    let mut component = WeaponComponent::new(weapon.period, weapon.volley_size).with_projectile(
        weapon.projectile_speed,
        weapon.projectile_lifetime,
        weapon.spread,
    );
    component.jitter = weapon.jitter;
    component.projectile_friction = friction;
    component
}

pub fn tree(position: Vector2) -> Entity {
    Entity::new(EntityKind::Neutral)
        .with(TransformComponent::new(position))
        .with(RenderDescriptor::new(
            Shape::Circle,
            Vector2::new(8.0, 8.0),
            Color::rgb(0.0, 0.5, 0.0),
        ))
}

fn projectile(kind: EntityKind, position: Vector2, velocity: Vector2, friction: f32, lifetime: f32) -> Entity {
    Entity::new(kind)
        .with(TransformComponent::new(position))
        .with(PhysicsComponent::new(friction).with_velocity(velocity))
        .with(LifeFeatureComponent::new(1).with_lifetime(lifetime))
        .with(RenderDescriptor::new(
            Shape::Rectangle,
            Vector2::new(10.0, 6.0),
            Color::rgb(1.0, 0.5, 0.0),
        ))
}

fn jittered(rng: &mut GameRng, origin: Vector2, jitter: f32) -> Vector2 {
    if jitter <= 0.0 {
        return origin;
    }
    let half = jitter / 2.0;
    origin + Vector2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half))
}

/// The player's skill: bolts alternating left and right of the caster
pub fn player_bolts(config: &GameConfig, caster: Vector2, rng: &mut GameRng) -> Vec<Entity> {
    let settings = &config.player;
    (0..settings.bolt_count)
        .map(|i| {
            let direction = if i % 2 == 0 { -1.0 } else { 1.0 };
            projectile(
                EntityKind::PlayerSkill,
                jittered(rng, caster, settings.bolt_jitter),
                Vector2::new(direction * settings.bolt_speed, 0.0),
                config.physics.projectile_friction,
                settings.bolt_lifetime,
            )
        })
        .collect()
}

/// One enemy volley: a fan of arrows centred on the direction to `target`
///
/// With no target the fan points along +X.
pub fn enemy_volley(origin: Vector2, weapon: &WeaponComponent, target: Option<Vector2>, rng: &mut GameRng) -> Vec<Entity> {
    let count = weapon.volley_size;
    let aim = target
        .map(|t| t - origin)
        .filter(|d| !d.is_zero())
        .map(|d| d.y.atan2(d.x))
        .unwrap_or(0.0);

    (0..count)
        .map(|i| {
            let offset = if count > 1 {
                -weapon.spread + 2.0 * weapon.spread * i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            projectile(
                EntityKind::EnemySkill,
                jittered(rng, origin, weapon.jitter),
                Vector2::from_angle(aim + offset) * weapon.projectile_speed,
                weapon.projectile_friction,
                weapon.projectile_lifetime,
            )
        })
        .collect()
}
