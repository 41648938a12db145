//! In-memory store shared by the steps of one collection run.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::entities::{Entity, Relationship};
use crate::error::{CollectorError, CollectorResult};

/// Everything a run collected, in insertion order.
#[derive(Debug, Default, Serialize)]
pub struct CollectedGraph {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Default)]
pub struct JobState {
    entities: Vec<Entity>,
    entity_keys: HashSet<String>,
    relationships: Vec<Relationship>,
    relationship_keys: HashSet<String>,
    data: HashMap<String, Entity>,
}

impl JobState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity and return a copy of it. Keys must be unique within a run.
    pub fn add_entity(&mut self, entity: Entity) -> CollectorResult<Entity> {
        if !self.entity_keys.insert(entity.key.clone()) {
            return Err(CollectorError::DuplicateKey(entity.key));
        }
        self.entities.push(entity.clone());
        Ok(entity)
    }

    pub fn add_relationship(&mut self, relationship: Relationship) -> CollectorResult<()> {
        if !self.relationship_keys.insert(relationship.key.clone()) {
            return Err(CollectorError::DuplicateKey(relationship.key));
        }
        self.relationships.push(relationship);
        Ok(())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entity_keys.contains(key)
    }

    /// Keep an entity under `key` for later steps.
    pub fn set_data(&mut self, key: impl Into<String>, entity: Entity) {
        self.data.insert(key.into(), entity);
    }

    pub fn get_data(&self, key: &str) -> Option<&Entity> {
        self.data.get(key)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn into_graph(self) -> CollectedGraph {
        CollectedGraph {
            entities: self.entities,
            relationships: self.relationships,
        }
    }
}
