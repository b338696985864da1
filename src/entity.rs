//! Entities: a kind tag, an active flag, and a component set
//!
//! Entities are plain data. What differs between a soldier and a projectile is
//! (a) which components they carry and (b) the per-kind function table looked
//! up through [`EntityKind::behavior`], which supplies the update hook and the
//! render silhouette.
//!
//! # Rust Learning Notes
//!
//! - **Newtype handles**: [`EntityId`] wraps a `u64` so handles can't be mixed
//!   up with counts or indices
//! - **Function tables instead of trait objects**: `fn` pointers in a static
//!   table give per-kind dispatch without boxing every entity

use crate::components::{Component, ComponentKind, ComponentSet, LifeFeatureComponent, LifetimeTick, PhysicsComponent, TransformComponent};
use crate::game::behavior::{self, KindBehavior, UpdateContext};
use crate::game::collision::CollisionLayer;
use crate::math::Vector2;
use crate::registry::Spawner;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable handle to an entity in the [`EntityRegistry`](crate::registry::EntityRegistry)
///
/// Handles are never reused within a registry. `EntityId::UNASSIGNED` marks an
/// entity that has not been inserted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u64);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of identity tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    EnemySoldier,
    EnemyKing,
    PlayerSkill,
    EnemySkill,
    /// Scenery (trees) and anything else that takes no part in combat
    Neutral,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Player,
        EntityKind::EnemySoldier,
        EntityKind::EnemyKing,
        EntityKind::PlayerSkill,
        EntityKind::EnemySkill,
        EntityKind::Neutral,
    ];

    /// Tag used in recordings and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::EnemySoldier => "EnemySoldier",
            EntityKind::EnemyKing => "EnemyKing",
            EntityKind::PlayerSkill => "PlayerSkill",
            EntityKind::EnemySkill => "EnemySkill",
            EntityKind::Neutral => "Neutral",
        }
    }

    /// Soldiers and kings; projectiles are not counted as enemies
    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::EnemySoldier | EntityKind::EnemyKing)
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self, EntityKind::PlayerSkill | EntityKind::EnemySkill)
    }

    /// Bodies are kept inside the map by the physics phase
    pub fn is_body(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::EnemySoldier | EntityKind::EnemyKing)
    }

    /// Which side of the fight this kind is on, `None` for scenery
    pub fn collision_layer(&self) -> Option<CollisionLayer> {
        match self {
            EntityKind::Player | EntityKind::PlayerSkill => Some(CollisionLayer::Player),
            EntityKind::EnemySoldier | EntityKind::EnemyKing | EntityKind::EnemySkill => {
                Some(CollisionLayer::Enemy)
            }
            EntityKind::Neutral => None,
        }
    }

    /// Per-kind update hook and silhouette
    pub fn behavior(&self) -> &'static KindBehavior {
        behavior::behavior_for(*self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown kind tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A tagged, composable object in the simulation
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    active: bool,
    components: ComponentSet,
}

impl Entity {
    /// Creates an active entity with no components
    pub fn new(kind: EntityKind) -> Self {
        Entity {
            id: EntityId::UNASSIGNED,
            kind,
            active: true,
            components: ComponentSet::new(),
        }
    }

    /// Builder form of [`Entity::add_component`]
    pub fn with<T: Component>(mut self, component: T) -> Self {
        self.components.insert(component);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Looks up a component; `None` means the entity lacks that capability
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    /// Attaches `component`, returning the instance of the same kind it replaced
    pub fn add_component<T: Component>(&mut self, component: T) -> Option<T> {
        self.components.insert(component)
    }

    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        self.components.remove::<T>()
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.has(kind)
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn position(&self) -> Option<Vector2> {
        self.get::<TransformComponent>().map(|t| t.position)
    }

    pub fn velocity(&self) -> Option<Vector2> {
        self.get::<PhysicsComponent>().map(|p| p.velocity)
    }

    pub fn health(&self) -> Option<i32> {
        self.get::<LifeFeatureComponent>().map(|life| life.health())
    }

    /// True when the life feature says this entity should be removed
    pub fn is_spent(&self) -> bool {
        self.get::<LifeFeatureComponent>()
            .is_some_and(|life| !life.is_alive() || life.is_lifetime_expired())
    }

    /// Generic per-tick update of every attached component
    ///
    /// On lifetime expiry the entity is parked off-stage with zero velocity;
    /// it stays in the registry until the cleanup point.
    pub fn update_components(&mut self, delta_time: f32) {
        if self.components.update(delta_time) == LifetimeTick::Expired {
            if let Some(transform) = self.get_mut::<TransformComponent>() {
                transform.move_off_stage();
            }
            if let Some(physics) = self.get_mut::<PhysicsComponent>() {
                physics.stop();
            }
        }
    }

    /// Component update followed by the kind's own update hook
    pub fn update(&mut self, spawner: &mut Spawner, ctx: &mut UpdateContext) {
        if !self.active {
            return;
        }
        self.update_components(ctx.delta_time);
        (self.kind.behavior().update)(self, spawner, ctx);
    }

    /// Draws the kind's silhouette; inactive entities draw nothing
    pub fn render(&self, renderer: &mut dyn Renderer) {
        if self.active {
            (self.kind.behavior().render)(self, renderer);
        }
    }
}
