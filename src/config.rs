//! Runtime configuration
//!
//! Read from the environment. Binaries call `dotenvy::dotenv()` first so a
//! local `.env` file can supply the same variables.

use std::path::PathBuf;

use tracing::warn;

use crate::i18n::Language;

pub const DATA_DIR_VAR: &str = "LEASE_DATA_DIR";
pub const LANGUAGE_VAR: &str = "LEASE_LANGUAGE";
pub const CLAUSES_DIR_VAR: &str = "LEASE_CLAUSES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseConfig {
    /// Directory holding one JSON file per record collection
    pub data_dir: PathBuf,
    /// Language used for marital-status words and export labels
    pub language: Language,
    /// Optional directory of `*.yaml` clause catalogs
    pub clauses_dir: Option<PathBuf>,
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            language: Language::Pt,
            clauses_dir: None,
        }
    }
}

impl LeaseConfig {
    /// Create config from LEASE_* env vars, defaulting to `data/` and Portuguese
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let language = match lookup(LANGUAGE_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; using {}", e, defaults.language);
                defaults.language
            }),
            None => defaults.language,
        };

        let clauses_dir = lookup(CLAUSES_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            data_dir,
            language,
            clauses_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LeaseConfig::from_lookup(lookup(&[]));
        assert_eq!(config, LeaseConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = LeaseConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/tmp/leases"),
            (LANGUAGE_VAR, "en-US"),
            (CLAUSES_DIR_VAR, "catalogs"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/leases"));
        assert_eq!(config.language, Language::En);
        assert_eq!(config.clauses_dir, Some(PathBuf::from("catalogs")));
    }

    #[test]
    fn test_bad_language_falls_back() {
        let config = LeaseConfig::from_lookup(lookup(&[(LANGUAGE_VAR, "klingon")]));
        assert_eq!(config.language, Language::Pt);
    }
}
