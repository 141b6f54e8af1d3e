//! Clause resolution

use std::collections::HashMap;

use lease_types::{Clause, ContractTemplate};
use tracing::debug;

/// Clauses referenced by `template`, in template order
///
/// IDs that no longer resolve are skipped. A repeated ID yields the clause
/// each time it appears.
pub fn resolve_clauses<'a>(template: &ContractTemplate, all_clauses: &'a [Clause]) -> Vec<&'a Clause> {
    // First occurrence wins if the catalog itself carries duplicate IDs
    let mut by_id: HashMap<&str, &Clause> = HashMap::with_capacity(all_clauses.len());
    for clause in all_clauses {
        by_id.entry(clause.id.as_str()).or_insert(clause);
    }

    template
        .clause_ids
        .iter()
        .filter_map(|id| {
            let found = by_id.get(id.as_str()).copied();
            if found.is_none() {
                debug!(template = %template.id, clause = %id, "skipping dangling clause reference");
            }
            found
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Clause> {
        vec![
            Clause::new("a", "A", "alpha"),
            Clause::new("b", "B", "beta"),
            Clause::new("c", "C", "gamma"),
        ]
    }

    #[test]
    fn test_template_order_preserved() {
        let template = ContractTemplate::new("t", "T", ["c", "a", "b"]);
        let clauses = catalog();
        let ids: Vec<_> = resolve_clauses(&template, &clauses)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dangling_ids_skipped() {
        let template = ContractTemplate::new("t", "T", ["a", "gone", "b", "c"]);
        let clauses = catalog();
        assert_eq!(resolve_clauses(&template, &clauses).len(), 3);
    }

    #[test]
    fn test_empty_template() {
        let template = ContractTemplate::new("t", "T", Vec::<String>::new());
        assert!(resolve_clauses(&template, &catalog()).is_empty());
    }
}
