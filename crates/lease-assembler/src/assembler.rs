//! Contract assembly entry point

use lease_types::{Clause, GenerationContext};
use tracing::debug;

use crate::header::build_header;
use crate::ordinal::ordinal_word;
use crate::resolve::resolve_clauses;
use crate::substitute::substitute;
use crate::token::{build_token_map, TokenMap};
use crate::translate::Translate;

/// Separator between header paragraphs and between clauses
pub const CLAUSE_SEPARATOR: &str = "\n\n";

/// Assemble the full contract text
///
/// Returns "" when the context has no template yet; callers treat that as
/// "not ready to render". Otherwise the header paragraphs are followed by one
/// `CLÁUSULA <ORDINAL>: <body>` paragraph per resolved clause.
pub fn format_contract(
    ctx: &GenerationContext,
    all_clauses: &[Clause],
    translate: &dyn Translate,
) -> String {
    let Some(template) = ctx.template.as_ref() else {
        debug!("no template selected, nothing to render");
        return String::new();
    };

    let tokens = build_token_map(ctx, translate);
    let clauses = resolve_clauses(template, all_clauses);
    debug!(
        template = %template.id,
        referenced = template.clause_ids.len(),
        resolved = clauses.len(),
        "assembling contract"
    );

    let mut paragraphs = build_header(ctx, translate);
    paragraphs.extend(
        clauses
            .iter()
            .enumerate()
            .map(|(idx, clause)| render_clause(idx + 1, clause, &tokens)),
    );

    paragraphs.join(CLAUSE_SEPARATOR)
}

/// Render one numbered clause; `position` is 1-based
pub fn render_clause(position: usize, clause: &Clause, tokens: &TokenMap) -> String {
    let ordinal = ordinal_word(i64::try_from(position).unwrap_or(i64::MAX));
    format!("CLÁUSULA {}: {}", ordinal, substitute(&clause.body, tokens))
}
