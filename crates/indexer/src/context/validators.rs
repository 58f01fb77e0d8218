//! Per-block validator store. Power overwrites (latest wins); the name is
//! overwritten only when the incoming one is non-empty.

use std::collections::HashMap;

use crate::types::Validator;

#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    entities: Vec<Validator>,
    index: HashMap<String, usize>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pubkey: &str, address: &str, power: i64, name: &str, height: u64) {
        match self.index.get(pubkey) {
            Some(&idx) => {
                let entity = &mut self.entities[idx];
                entity.power = power;
                if !name.is_empty() {
                    entity.name = name.to_string();
                }
            }
            None => {
                let idx = self.entities.len();
                self.entities.push(Validator {
                    pubkey: pubkey.to_string(),
                    address: address.to_string(),
                    power,
                    name: name.to_string(),
                    height,
                });
                self.index.insert(pubkey.to_string(), idx);
            }
        }
    }

    pub fn lookup(&self, pubkey: &str) -> Option<&Validator> {
        self.index.get(pubkey).map(|&idx| &self.entities[idx])
    }

    pub fn into_entities(self) -> Vec<Validator> {
        self.entities
    }
}
