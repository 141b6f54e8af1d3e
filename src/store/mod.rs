//! Record store
//!
//! Every collection is a flat JSON array kept under one key. Operations are
//! get-all, get-by-id, upsert-by-id and delete-by-id, each a full
//! read-modify-write of the collection.

mod backend;

use std::fmt;

use lease_types::{Clause, ContractTemplate, GeneratedContract, LandlordProfile, PropertyProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use backend::{InMemoryKeyValueStore, KeyValueStore, LocalKeyValueStore};

use crate::catalog;
use crate::error::{LeaseError, Result};

/// The record collections the application persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Landlords,
    Properties,
    Clauses,
    Templates,
    Contracts,
}

impl Collection {
    pub fn all() -> &'static [Collection] {
        &[
            Collection::Landlords,
            Collection::Properties,
            Collection::Clauses,
            Collection::Templates,
            Collection::Contracts,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Landlords => "landlords",
            Collection::Properties => "properties",
            Collection::Clauses => "clauses",
            Collection::Templates => "templates",
            Collection::Contracts => "generated_contracts",
        }
    }

    /// Storage key for the collection
    pub fn key(&self) -> String {
        format!("lease_app_{}", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record that lives in one collection and is addressed by ID
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Contents of the collection before it has ever been saved
    fn initial() -> Vec<Self> {
        Vec::new()
    }
}

impl Record for LandlordProfile {
    const COLLECTION: Collection = Collection::Landlords;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PropertyProfile {
    const COLLECTION: Collection = Collection::Properties;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Clause {
    const COLLECTION: Collection = Collection::Clauses;

    fn id(&self) -> &str {
        &self.id
    }

    fn initial() -> Vec<Self> {
        catalog::default_clauses()
    }
}

impl Record for ContractTemplate {
    const COLLECTION: Collection = Collection::Templates;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for GeneratedContract {
    const COLLECTION: Collection = Collection::Contracts;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed record access over a [`KeyValueStore`]
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
}

impl RecordStore<InMemoryKeyValueStore> {
    pub fn in_memory() -> Self {
        Self::new(InMemoryKeyValueStore::new())
    }
}

impl RecordStore<LocalKeyValueStore> {
    pub fn local(base_path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(LocalKeyValueStore::new(base_path))
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All records of a collection, in stored order
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        match self.backend.get_item(&R::COLLECTION.key())? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(R::initial()),
        }
    }

    pub fn find<R: Record>(&self, id: &str) -> Result<Option<R>> {
        Ok(self.list::<R>()?.into_iter().find(|r| r.id() == id))
    }

    /// Record by ID, or `NotFound`
    pub fn get<R: Record>(&self, id: &str) -> Result<R> {
        self.find(id)?
            .ok_or_else(|| LeaseError::not_found(R::COLLECTION, id))
    }

    /// Replace the record with the same ID, or append it
    pub fn upsert<R: Record>(&self, record: R) -> Result<()> {
        let mut records = self.list::<R>()?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                debug!(collection = %R::COLLECTION, id = record.id(), "updating record");
                records[index] = record;
            }
            None => {
                debug!(collection = %R::COLLECTION, id = record.id(), "inserting record");
                records.push(record);
            }
        }
        self.save_all(&records)
    }

    /// Delete by ID. Returns whether a record was removed.
    pub fn delete<R: Record>(&self, id: &str) -> Result<bool> {
        let mut records = self.list::<R>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() != before;
        if removed {
            self.save_all(&records)?;
        }
        Ok(removed)
    }

    /// Overwrite the whole collection
    pub fn save_all<R: Record>(&self, records: &[R]) -> Result<()> {
        let raw = serde_json::to_string_pretty(records)?;
        self.backend.set_item(&R::COLLECTION.key(), &raw)
    }

    /// Drop every collection; clauses fall back to the defaults afterwards
    pub fn reset(&self) -> Result<()> {
        for collection in Collection::all() {
            self.backend.remove_item(&collection.key())?;
        }
        info!("all collections reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lease_types::PersonData;

    #[test]
    fn test_empty_collections() {
        let store = RecordStore::in_memory();
        assert!(store.list::<LandlordProfile>().unwrap().is_empty());
        assert!(store.list::<ContractTemplate>().unwrap().is_empty());
    }

    #[test]
    fn test_clauses_default_until_saved() {
        let store = RecordStore::in_memory();
        let defaults = store.list::<Clause>().unwrap();
        assert_eq!(defaults, catalog::default_clauses());

        store.save_all(&[Clause::new("only", "Única", "texto")]).unwrap();
        assert_eq!(store.list::<Clause>().unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let store = RecordStore::in_memory();
        let mut landlord = LandlordProfile::new(PersonData::new("José"));
        store.upsert(landlord.clone()).unwrap();

        landlord.data.name = "José Almeida".into();
        store.upsert(landlord.clone()).unwrap();

        let all = store.list::<LandlordProfile>().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].data.name, "José Almeida");
    }

    #[test]
    fn test_get_and_delete() {
        let store = RecordStore::in_memory();
        let landlord = LandlordProfile::new(PersonData::new("Ana"));
        let id = landlord.id.clone();
        store.upsert(landlord).unwrap();

        assert_eq!(store.get::<LandlordProfile>(&id).unwrap().data.name, "Ana");
        assert!(store.delete::<LandlordProfile>(&id).unwrap());
        assert!(!store.delete::<LandlordProfile>(&id).unwrap());
        assert!(store.get::<LandlordProfile>(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_reset_restores_default_clauses() {
        let store = RecordStore::in_memory();
        store.save_all::<Clause>(&[]).unwrap();
        assert!(store.list::<Clause>().unwrap().is_empty());
        store.reset().unwrap();
        assert_eq!(store.list::<Clause>().unwrap().len(), catalog::default_clauses().len());
    }
}
