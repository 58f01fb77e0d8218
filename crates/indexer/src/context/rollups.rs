//! Per-block rollup store. Content-keyed by rollup id so in-block merge
//! order doesn't matter.

use std::collections::HashMap;

use crate::types::Rollup;

#[derive(Debug, Default)]
pub struct RollupRegistry {
    entities: Vec<Rollup>,
    index: HashMap<String, usize>,
}

impl RollupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulating upsert: size, action count and bridge count add onto
    /// whatever earlier actions in the block recorded.
    pub fn set(&mut self, id: &str, height: u64, size: u64, actions: u64, bridges: u64) {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                let idx = self.entities.len();
                self.entities.push(Rollup {
                    id: id.to_string(),
                    first_height: height,
                    size: 0,
                    actions_count: 0,
                    bridge_count: 0,
                });
                self.index.insert(id.to_string(), idx);
                idx
            }
        };

        let entity = &mut self.entities[idx];
        entity.size += size;
        entity.actions_count += actions;
        entity.bridge_count += bridges;
    }

    pub fn lookup(&self, id: &str) -> Option<&Rollup> {
        self.index.get(id).map(|&idx| &self.entities[idx])
    }

    pub fn into_entities(self) -> Vec<Rollup> {
        self.entities
    }
}
