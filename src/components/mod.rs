//! Component framework
//!
//! Components are attachable data/behaviour units on an [`Entity`](crate::entity::Entity).
//! The set of kinds is closed ([`ComponentKind`]) and every entity stores its
//! components in a [`ComponentSet`] with one fixed slot per kind, so lookups are
//! a field access instead of a type-map search.
//!
//! # Architecture
//!
//! - `transform.rs`: position
//! - `physics.rs`: velocity + friction integration
//! - `life_feature.rs`: health, invulnerability, optional lifetime timer
//! - `render_descriptor.rs`: shape/size/color read by presentation only
//! - `weapon.rs`: volley timer for enemies that shoot
//!
//! # Rust Learning Notes
//!
//! The [`Component`] trait maps a concrete type to its slot at compile time.
//! `entity.get::<PhysicsComponent>()` therefore returns `Option<&PhysicsComponent>`
//! with no downcasting and no allocation.

pub mod life_feature;
pub mod physics;
pub mod render_descriptor;
pub mod transform;
pub mod weapon;

pub use life_feature::{DamageResult, LifeFeatureComponent, LifetimeTick};
pub use physics::PhysicsComponent;
pub use render_descriptor::{RenderDescriptor, Shape};
pub use transform::{OFF_STAGE, TransformComponent};
pub use weapon::WeaponComponent;

/// Every kind of component an entity can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Physics,
    LifeFeature,
    Render,
    Weapon,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Transform,
        ComponentKind::Physics,
        ComponentKind::LifeFeature,
        ComponentKind::Render,
        ComponentKind::Weapon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Transform => "TransformComponent",
            ComponentKind::Physics => "PhysicsComponent",
            ComponentKind::LifeFeature => "LifeFeatureComponent",
            ComponentKind::Render => "RenderComponent",
            ComponentKind::Weapon => "WeaponComponent",
        }
    }
}

/// A type that lives in one fixed slot of a [`ComponentSet`]
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn slot(set: &ComponentSet) -> &Option<Self>;

    fn slot_mut(set: &mut ComponentSet) -> &mut Option<Self>;
}

/// Fixed-slot storage holding at most one component per kind
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    transform: Option<TransformComponent>,
    physics: Option<PhysicsComponent>,
    life_feature: Option<LifeFeatureComponent>,
    render: Option<RenderDescriptor>,
    weapon: Option<WeaponComponent>,
}

macro_rules! impl_component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn slot(set: &ComponentSet) -> &Option<Self> {
                &set.$field
            }

            fn slot_mut(set: &mut ComponentSet) -> &mut Option<Self> {
                &mut set.$field
            }
        }
    };
}

impl_component!(TransformComponent, Transform, transform);
impl_component!(PhysicsComponent, Physics, physics);
impl_component!(LifeFeatureComponent, LifeFeature, life_feature);
impl_component!(RenderDescriptor, Render, render);
impl_component!(WeaponComponent, Weapon, weapon);

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        T::slot(self).as_ref()
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        T::slot_mut(self).as_mut()
    }

    /// Stores `component`, returning the instance it replaced (if any)
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        T::slot_mut(self).replace(component)
    }

    pub fn remove<T: Component>(&mut self) -> Option<T> {
        T::slot_mut(self).take()
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform => self.transform.is_some(),
            ComponentKind::Physics => self.physics.is_some(),
            ComponentKind::LifeFeature => self.life_feature.is_some(),
            ComponentKind::Render => self.render.is_some(),
            ComponentKind::Weapon => self.weapon.is_some(),
        }
    }

    /// Kinds currently attached, in slot order
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL.into_iter().filter(|kind| self.has(*kind))
    }

    pub fn len(&self) -> usize {
        self.kinds().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the per-tick update of every attached component
    ///
    /// Only the life feature keeps time (lifetime and invulnerability window).
    /// Physics integrates in the rule engine's physics phase and weapons in the
    /// enemy attack phase, each exactly once per tick.
    pub fn update(&mut self, delta_time: f32) -> LifetimeTick {
        let mut tick = LifetimeTick::Running;
        for kind in ComponentKind::ALL {
            match kind {
                ComponentKind::LifeFeature => {
                    if let Some(life) = self.life_feature.as_mut() {
                        tick = life.update(delta_time);
                    }
                }
                ComponentKind::Transform
                | ComponentKind::Physics
                | ComponentKind::Render
                | ComponentKind::Weapon => {}
            }
        }
        tick
    }
}
