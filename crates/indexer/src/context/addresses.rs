//! Per-block address store with accumulation-on-upsert semantics.

use std::collections::HashMap;

use crate::types::Address;

/// Stable handle into the registry's arena. Two touches of the same address
/// within one block yield the same id, so later mutations are observed
/// through earlier handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressId(usize);

#[derive(Debug)]
pub struct AddressRegistry {
    native: String,
    entities: Vec<Address>,
    index: HashMap<String, usize>,
}

impl AddressRegistry {
    pub fn new(native: String) -> Self {
        Self {
            native,
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Idempotent upsert. A first touch creates the entity with a single
    /// balance bucket; every later touch mutates the same entity: counters
    /// increment, and the delta merges into the matching currency bucket
    /// (or appends a new one). An empty currency means the native currency.
    pub fn set(
        &mut self,
        address: &str,
        height: u64,
        delta: i128,
        currency: &str,
        action_touches: u64,
        signed_tx_touches: u64,
    ) -> AddressId {
        let currency = if currency.is_empty() {
            self.native.clone()
        } else {
            currency.to_string()
        };

        let idx = match self.index.get(address) {
            Some(&idx) => idx,
            None => {
                let idx = self.entities.len();
                self.entities.push(Address::new(address.to_string(), height));
                self.index.insert(address.to_string(), idx);
                idx
            }
        };

        let entity = &mut self.entities[idx];
        entity.actions_count += action_touches;
        entity.signed_tx_count += signed_tx_touches;
        entity.apply_balance(&currency, delta);

        AddressId(idx)
    }

    /// Overwrite the recorded nonce. No-op if the address was never seen.
    pub fn update_nonce(&mut self, address: &str, nonce: u32) {
        if let Some(&idx) = self.index.get(address) {
            self.entities[idx].nonce = nonce;
        }
    }

    pub fn mark_bridge(&mut self, address: &str) {
        if let Some(&idx) = self.index.get(address) {
            self.entities[idx].is_bridge = true;
        }
    }

    pub fn set_ibc_relayer(&mut self, address: &str, is_relayer: bool) {
        if let Some(&idx) = self.index.get(address) {
            self.entities[idx].is_ibc_relayer = is_relayer;
        }
    }

    pub fn get(&self, id: AddressId) -> &Address {
        &self.entities[id.0]
    }

    pub fn lookup(&self, address: &str) -> Option<&Address> {
        self.index.get(address).map(|&idx| &self.entities[idx])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Hand the accumulated entities to the block snapshot.
    pub fn into_entities(self) -> Vec<Address> {
        self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AddressRegistry {
        AddressRegistry::new("nria".to_string())
    }

    #[test]
    fn test_same_currency_accumulates_into_one_row() {
        let mut reg = registry();
        let a = reg.set("astria1abc", 5, 100, "nria", 1, 0);
        let b = reg.set("astria1abc", 5, -30, "nria", 1, 0);
        assert_eq!(a, b);

        let entity = reg.get(a);
        assert_eq!(entity.balances.len(), 1);
        assert_eq!(entity.balances[0].value, 70);
        assert_eq!(entity.actions_count, 2);
    }

    #[test]
    fn test_different_currencies_get_separate_rows() {
        let mut reg = registry();
        let id = reg.set("astria1abc", 5, 100, "nria", 1, 0);
        reg.set("astria1abc", 5, 7, "transfer/channel-0/uatom", 1, 0);

        let entity = reg.get(id);
        assert_eq!(entity.balances.len(), 2);
    }

    #[test]
    fn test_empty_currency_defaults_to_native() {
        let mut reg = registry();
        let id = reg.set("astria1abc", 5, 10, "", 0, 1);
        let entity = reg.get(id);
        assert_eq!(entity.balances[0].currency, "nria");
        assert_eq!(entity.signed_tx_count, 1);
    }

    #[test]
    fn test_self_transfer_nets_to_zero() {
        let mut reg = registry();
        let id = reg.set("astria1abc", 5, -40, "nria", 1, 0);
        reg.set("astria1abc", 5, 40, "nria", 0, 0);

        let entity = reg.get(id);
        assert_eq!(entity.balances.len(), 1);
        assert_eq!(entity.balances[0].value, 0);
    }

    #[test]
    fn test_first_height_is_kept_on_later_touches() {
        let mut reg = registry();
        let id = reg.set("astria1abc", 5, 0, "", 1, 0);
        reg.set("astria1abc", 5, 0, "", 1, 0);
        assert_eq!(reg.get(id).first_height, 5);
    }

    #[test]
    fn test_update_nonce_overwrites_and_ignores_unseen() {
        let mut reg = registry();
        reg.set("astria1abc", 5, 0, "", 0, 1);
        reg.update_nonce("astria1abc", 9);
        reg.update_nonce("astria1unseen", 4);

        assert_eq!(reg.lookup("astria1abc").unwrap().nonce, 9);
        assert!(reg.lookup("astria1unseen").is_none());
    }
}
