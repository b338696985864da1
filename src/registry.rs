//! Entity registry
//!
//! Owns every live entity. Iteration visits active entities in insertion
//! order. Entities created while an iteration is running go through a
//! [`Spawner`] into a pending queue; the queue is appended at the next safe
//! point ([`EntityRegistry::flush_pending`]), so no phase ever mutates the
//! collection it is walking.
//!
//! # Rust Learning Notes
//!
//! The borrow checker enforces the "no insert during iteration" rule for us:
//! `for_each_active_mut` borrows `entities` mutably and hands the callback a
//! `Spawner` that can only reach `pending`. The two fields are borrowed
//! disjointly, so there is no way to push into the vector being iterated.

use crate::entity::{Entity, EntityId, EntityKind};

/// Deferred-insertion handle given to code running inside an iteration
pub struct Spawner<'a> {
    pending: &'a mut Vec<Entity>,
    next_id: &'a mut u64,
}

impl<'a> Spawner<'a> {
    /// Reserves a handle for `entity` and queues it for the next flush
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(*self.next_id);
        *self.next_id += 1;
        entity.assign_id(id);
        log::debug!("queued {} {}", entity.kind(), id);
        self.pending.push(entity);
        id
    }

    /// Number of entities queued so far (including earlier spawns this tick)
    pub fn queued(&self) -> usize {
        self.pending.len()
    }
}

/// Owner of all entities in a session
#[derive(Debug)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    pending: Vec<Entity>,
    next_id: u64,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        EntityRegistry {
            entities: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Inserts immediately and returns the entity's stable handle
    ///
    /// Only valid outside an iteration (enforced by `&mut self`). Anything
    /// already queued is flushed first so insertion order follows handle order.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = self.queue(entity);
        self.flush_pending();
        id
    }

    /// Reserves a handle and defers insertion to the next flush
    pub fn queue(&mut self, entity: Entity) -> EntityId {
        self.spawner().spawn(entity)
    }

    pub fn spawner(&mut self) -> Spawner<'_> {
        Spawner {
            pending: &mut self.pending,
            next_id: &mut self.next_id,
        }
    }

    /// Appends every queued entity, returning how many were added
    pub fn flush_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.entities.append(&mut self.pending);
        count
    }

    /// Entities waiting for the next flush
    pub fn pending(&self) -> &[Entity] {
        &self.pending
    }

    /// Drops every inactive entity, returning how many were removed
    pub fn remove_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(Entity::is_active);
        before - self.entities.len()
    }

    /// Visits active entities in insertion order
    pub fn for_each_active<F>(&self, mut f: F)
    where
        F: FnMut(&Entity),
    {
        for entity in self.entities.iter().filter(|e| e.is_active()) {
            f(entity);
        }
    }

    /// Mutable visit; spawns made through the `Spawner` wait for the next flush
    pub fn for_each_active_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Entity, &mut Spawner),
    {
        let mut spawner = Spawner {
            pending: &mut self.pending,
            next_id: &mut self.next_id,
        };
        for entity in self.entities.iter_mut().filter(|e| e.is_active()) {
            f(entity, &mut spawner);
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut().filter(|e| e.is_active())
    }

    /// All inserted entities, active or not
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|index| &self.entities[index])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |index| &mut self.entities[index])
    }

    /// First active entity of `kind` in insertion order
    pub fn find_first(&self, kind: EntityKind) -> Option<&Entity> {
        self.iter_active().find(|e| e.kind() == kind)
    }

    pub fn count_active<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&Entity) -> bool,
    {
        self.iter_active().filter(|e| predicate(e)).count()
    }

    /// Inserted entities, active or not (pending ones excluded)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Removes everything, including queued spawns; handles keep increasing
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending.clear();
    }

    // Handles are assigned in increasing order and flushes append in queue
    // order, so `entities` is always sorted by id.
    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, Entity::id).ok()
    }
}
