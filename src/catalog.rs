//! Clause catalogs
//!
//! The built-in Portuguese catalog ships inside the binary. Additional catalogs
//! can be loaded from a directory of `*.yaml` files, each shaped like
//! `config/default_clauses.yaml`.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use lease_types::{Clause, ClauseCategory, ContractTemplate};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const DEFAULT_CLAUSES_YAML: &str = include_str!("../config/default_clauses.yaml");

pub const DEFAULT_TEMPLATE_ID: &str = "default-residential";
pub const DEFAULT_GUARANTOR_TEMPLATE_ID: &str = "default-residential-guarantor";

/// Clause IDs in the built-in catalog that concern the guarantor
const GUARANTOR_CLAUSES: &[&str] = &["clause-18"];

/// On-disk catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClauseCatalog {
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

/// The built-in clause set
pub fn default_clauses() -> Vec<Clause> {
    static DEFAULTS: OnceLock<Vec<Clause>> = OnceLock::new();
    DEFAULTS
        .get_or_init(|| match serde_yaml::from_str::<ClauseCatalog>(DEFAULT_CLAUSES_YAML) {
            Ok(catalog) => catalog.clauses,
            Err(e) => {
                error!("built-in clause catalog is malformed: {}", e);
                Vec::new()
            }
        })
        .clone()
}

/// Template over every built-in clause except the guarantor ones
pub fn default_template() -> ContractTemplate {
    let ids = default_clauses()
        .into_iter()
        .map(|c| c.id)
        .filter(|id| !GUARANTOR_CLAUSES.contains(&id.as_str()));
    ContractTemplate::new(DEFAULT_TEMPLATE_ID, "Locação Residencial", ids)
}

/// Template over every built-in clause, guarantor included
pub fn default_guarantor_template() -> ContractTemplate {
    let ids = default_clauses().into_iter().map(|c| c.id);
    ContractTemplate::new(
        DEFAULT_GUARANTOR_TEMPLATE_ID,
        "Locação Residencial com Fiador",
        ids,
    )
    .with_guarantor()
}

/// Only the obligatory clauses of a catalog, in catalog order
pub fn obligatory(clauses: &[Clause]) -> Vec<&Clause> {
    clauses
        .iter()
        .filter(|c| c.category == ClauseCategory::Obligatory)
        .collect()
}

/// Load one catalog file (YAML; JSON is accepted as a YAML subset)
pub fn load_catalog_file(path: &Path) -> Result<Vec<Clause>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let catalog: ClauseCatalog = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(catalog.clauses)
}

/// Load and merge every `*.yaml` / `*.yml` catalog in `dir`
///
/// Files are read in name order. A clause ID defined twice is an error.
pub fn load_catalog_dir(dir: &Path) -> Result<Vec<Clause>> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                )
        })
        .collect();
    files.sort();

    let mut seen = HashSet::new();
    let mut clauses = Vec::new();
    for file in &files {
        for clause in load_catalog_file(file)? {
            if !seen.insert(clause.id.clone()) {
                bail!(
                    "Duplicate clause id '{}' in {}",
                    clause.id,
                    file.display()
                );
            }
            clauses.push(clause);
        }
    }

    info!(
        "Loaded {} clauses from {} catalog files in {}",
        clauses.len(),
        files.len(),
        dir.display()
    );
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lease_assembler::Token;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_parses() {
        let clauses = default_clauses();
        assert_eq!(clauses.len(), 18);
        assert_eq!(clauses[0].id, "clause-1");
        assert!(clauses.iter().all(|c| !c.body.trim().is_empty()));
        assert!(clauses[2].body.contains("{RENT}"));
    }

    #[test]
    fn test_builtin_placeholders_are_known_tokens() {
        let placeholder = regex::Regex::new(r"\{([A-Z_]+)\}").unwrap();
        for clause in default_clauses() {
            for cap in placeholder.captures_iter(&clause.body) {
                assert!(
                    Token::from_name(&cap[1]).is_some(),
                    "{} uses unknown token {}",
                    clause.id,
                    &cap[1]
                );
            }
        }
    }

    #[test]
    fn test_default_templates() {
        let plain = default_template();
        let with_guarantor = default_guarantor_template();
        assert_eq!(plain.clause_ids.len(), 17);
        assert!(!plain.has_guarantor);
        assert_eq!(with_guarantor.clause_ids.len(), 18);
        assert!(with_guarantor.has_guarantor);
        assert_eq!(plain.clause_ids[0], "clause-1");
    }

    #[test]
    fn test_obligatory_filter() {
        let clauses = default_clauses();
        let required = obligatory(&clauses);
        assert!(!required.is_empty());
        assert!(required.len() < clauses.len());
    }

    #[test]
    fn test_load_catalog_dir_merges_in_name_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("b.yaml"),
            "clauses:\n  - id: b1\n    title: B\n    content: segundo arquivo\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a.yml"),
            "clauses:\n  - id: a1\n    title: A\n    content: \"{TENANT}\"\n    category: optional\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let clauses = load_catalog_dir(dir.path()).unwrap();
        let ids: Vec<_> = clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1"]);
        assert_eq!(clauses[0].category, ClauseCategory::Optional);
    }

    #[test]
    fn test_malformed_catalog_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "clauses: [unterminated").unwrap();

        let err = load_catalog_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let body = "clauses:\n  - id: dup\n    content: x\n";
        std::fs::write(dir.path().join("a.yaml"), body).unwrap();
        std::fs::write(dir.path().join("b.yaml"), body).unwrap();

        let err = load_catalog_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate clause id 'dup'"));
    }
}
