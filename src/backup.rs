//! JSON backup and restore of every record collection

use chrono::{DateTime, NaiveDate, Utc};
use lease_types::{Clause, ContractTemplate, GeneratedContract, LandlordProfile, PropertyProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{LeaseError, Result};
use crate::store::{KeyValueStore, RecordStore};

pub const BACKUP_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub landlords: Vec<LandlordProfile>,
    pub properties: Vec<PropertyProfile>,
    #[serde(default)]
    pub templates: Vec<ContractTemplate>,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub generated_contracts: Vec<GeneratedContract>,
}

/// Counts of records written by an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub landlords: usize,
    pub properties: usize,
    pub templates: usize,
    pub clauses: usize,
    pub generated_contracts: usize,
}

impl Backup {
    /// Snapshot every collection of `store`
    pub fn collect<S: KeyValueStore>(store: &RecordStore<S>) -> Result<Self> {
        Ok(Self {
            version: BACKUP_VERSION,
            timestamp: Utc::now(),
            landlords: store.list()?,
            properties: store.list()?,
            templates: store.list()?,
            clauses: store.list()?,
            generated_contracts: store.list()?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a backup file
    ///
    /// Rejects anything without a version, landlords and properties before
    /// attempting a typed parse, so a wrong file gets a clear message.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| LeaseError::InvalidBackup(format!("not valid JSON: {}", e)))?;

        for field in ["version", "landlords", "properties"] {
            if value.get(field).map_or(true, Value::is_null) {
                return Err(LeaseError::InvalidBackup(format!(
                    "missing required field '{}'",
                    field
                )));
            }
        }

        let backup: Backup = serde_json::from_value(value)
            .map_err(|e| LeaseError::InvalidBackup(e.to_string()))?;
        if backup.version != BACKUP_VERSION {
            warn!(
                "backup version {} differs from {}, importing anyway",
                backup.version, BACKUP_VERSION
            );
        }
        Ok(backup)
    }

    /// Suggested file name, e.g. `lease_contract_backup_2025-03-01.json`
    pub fn file_name(date: NaiveDate) -> String {
        format!("lease_contract_backup_{}.json", date.format("%Y-%m-%d"))
    }

    /// Write the backup into `store`
    ///
    /// Records are upserted one by one, so existing records with other IDs
    /// survive. The clause catalog is replaced wholesale, but only when the
    /// backup carries clauses.
    pub fn restore<S: KeyValueStore>(&self, store: &RecordStore<S>) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for item in &self.landlords {
            store.upsert(item.clone())?;
            summary.landlords += 1;
        }
        for item in &self.properties {
            store.upsert(item.clone())?;
            summary.properties += 1;
        }
        for item in &self.templates {
            store.upsert(item.clone())?;
            summary.templates += 1;
        }
        if !self.clauses.is_empty() {
            store.save_all(&self.clauses)?;
            summary.clauses = self.clauses.len();
        }
        for item in &self.generated_contracts {
            store.upsert(item.clone())?;
            summary.generated_contracts += 1;
        }

        info!(?summary, "backup restored");
        Ok(summary)
    }
}
