//! Collision detection for the combat phase
//!
//! Everything that fights is treated as a circle of the same fixed radius, so
//! two entities touch when their centres are closer than `hit_distance`.
//! Entities are sorted into two layers and only opposite layers interact.
//!
//! # Architecture
//!
//! - `CollisionLayer`: which side of the fight an entity is on
//! - `Collider`: a snapshot of one entity taken before any damage is applied
//! - `find_contacts`: pure function producing candidate pairs in a stable order
//!
//! # Rust Learning Notes
//!
//! The combat phase needs to read every position while it mutates health.
//! Taking a `Vec<Collider>` snapshot first avoids holding a shared borrow of
//! the registry while writing to it.

use crate::entity::{EntityId, EntityKind};
use crate::math::Vector2;

/// Which side of the fight an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// The player and the player's projectiles
    Player,
    /// Soldiers, kings, and enemy projectiles
    Enemy,
}

impl CollisionLayer {
    /// Only opposite layers interact
    pub fn opposes(self, other: CollisionLayer) -> bool {
        self != other
    }
}

/// Position snapshot of one collidable entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: EntityId,
    pub kind: EntityKind,
    pub layer: CollisionLayer,
    pub position: Vector2,
}

/// True when two centres are strictly closer than `hit_distance`
///
/// Touching exactly at `hit_distance` does not count, the same boundary rule
/// the rectangle tests used.
pub fn circles_overlap(a: Vector2, b: Vector2, hit_distance: f32) -> bool {
    (a - b).length_squared() < hit_distance * hit_distance
}

/// All overlapping pairs `(player_side, enemy_side)` as indices into `colliders`
///
/// Pairs come out ordered by the player-side index, then the enemy-side index,
/// so the combat phase resolves hits in insertion order. Projectile vs
/// projectile pairs are skipped.
pub fn find_contacts(colliders: &[Collider], hit_distance: f32) -> Vec<(usize, usize)> {
    let mut contacts = Vec::new();

    for (i, a) in colliders.iter().enumerate() {
        if a.layer != CollisionLayer::Player {
            continue;
        }
        for (j, b) in colliders.iter().enumerate() {
            if !a.layer.opposes(b.layer) {
                continue;
            }
            if a.kind.is_projectile() && b.kind.is_projectile() {
                continue;
            }
            if circles_overlap(a.position, b.position, hit_distance) {
                contacts.push((i, j));
            }
        }
    }

    contacts
}
