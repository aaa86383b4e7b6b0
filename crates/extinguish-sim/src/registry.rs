//! Stable object ids mapped to hecs entities.

use std::collections::HashMap;

use hecs::Entity;

use extinguish_core::types::ObjectId;

/// Allocates `ObjectId`s and remembers which entity each one names.
/// Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    by_id: HashMap<ObjectId, Entity>,
    next_id: u32,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }

    pub fn register(&mut self, id: ObjectId, entity: Entity) {
        self.by_id.insert(id, entity);
    }

    pub fn entity(&self, id: ObjectId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
