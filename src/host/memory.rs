use crate::error::HostError;

use super::{Entity, EntityId, EntityPatch, EntityStore};

/// Entity store kept in memory, in insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entities: Vec<Entity>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: Vec<Entity>) -> Self {
        let mut store = Self::new();
        store.replace_all(entities);
        store
    }

    /// Swap the whole world for a freshly loaded one
    pub fn replace_all(&mut self, entities: Vec<Entity>) {
        self.entities.clear();
        for entity in entities {
            self.insert(entity);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn insert(&mut self, mut entity: Entity) -> EntityId {
        if entity.id.is_empty() {
            entity.id = self.unused_id();
        }
        let id = entity.id.clone();
        self.entities.push(entity);
        id
    }

    /// Next generated id not already taken by a loaded entity
    fn unused_id(&mut self) -> EntityId {
        loop {
            self.next_id += 1;
            let id = format!("entity-{}", self.next_id);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl EntityStore for InMemoryStore {
    fn entities(&self) -> Result<Vec<Entity>, HostError> {
        Ok(self.entities.clone())
    }

    fn add(&mut self, entity: Entity) -> Result<EntityId, HostError> {
        Ok(self.insert(entity))
    }

    fn update(&mut self, id: &str, patch: &EntityPatch) -> Result<(), HostError> {
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| HostError::EntityNotFound(id.to_string()))?;
        entity.apply(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_ids() {
        let mut store = InMemoryStore::new();
        let a = store.add(Entity::default()).unwrap();
        let b = store.add(Entity::default()).unwrap();
        let c = store
            .add(Entity {
                id: "named".into(),
                ..Default::default()
            })
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(c, "named");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_generated_ids_skip_loaded_ones() {
        let mut store = InMemoryStore::with_entities(vec![
            Entity {
                id: "entity-1".into(),
                ..Default::default()
            },
            Entity {
                id: "entity-2".into(),
                ..Default::default()
            },
        ]);

        let id = store.add(Entity::default()).unwrap();
        assert_eq!(id, "entity-3");
        assert_eq!(store.entities().unwrap().iter().filter(|e| e.id == id).count(), 1);
    }

    #[test]
    fn test_update_unknown_entity_fails() {
        let mut store = InMemoryStore::new();
        let err = store
            .update("missing", &EntityPatch::visibility(true))
            .unwrap_err();
        assert!(matches!(err, HostError::EntityNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_update_applies_patch() {
        let mut store = InMemoryStore::new();
        let id = store.add(Entity::default()).unwrap();
        store.update(&id, &EntityPatch::visibility(false)).unwrap();
        assert!(store.get(&id).unwrap().hidden);
    }
}
