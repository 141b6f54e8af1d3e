//! Clause authoring lint
//!
//! Substitution only fires for bracketed vocabulary tokens. An author who
//! writes `TENANT` without brackets, or `{PERIOD}` which is not a token, gets
//! the text back unchanged. The lint surfaces both cases; it never alters
//! what the assembler does.

use std::fmt;
use std::sync::OnceLock;

use lease_assembler::Token;
use lease_types::Clause;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintFinding {
    /// A vocabulary token written without brackets; it will not be substituted
    BareToken { token: String, offset: usize },
    /// A bracketed name outside the vocabulary; it will be left as written
    UnknownPlaceholder { placeholder: String, offset: usize },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::BareToken { token, offset } => write!(
                f,
                "bare token {} at byte {} will not be substituted; write {{{}}}",
                token, offset, token
            ),
            LintFinding::UnknownPlaceholder {
                placeholder,
                offset,
            } => write!(
                f,
                "placeholder {} at byte {} is not a known token and will be left as written",
                placeholder, offset
            ),
        }
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$?\{([A-Z_]+)\}|\[([A-Z_]+)\]").expect("placeholder pattern is valid")
    })
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][A-Z_]*\b").expect("word pattern is valid"))
}

/// Findings for one clause body, in text order
pub fn lint_body(body: &str) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut bracketed = Vec::new();

    for caps in placeholder_re().captures_iter(body) {
        let Some(whole) = caps.get(0) else { continue };
        bracketed.push(whole.range());
        let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
        if let Some(name) = name {
            if Token::from_name(name).is_none() {
                findings.push(LintFinding::UnknownPlaceholder {
                    placeholder: whole.as_str().to_string(),
                    offset: whole.start(),
                });
            }
        }
    }

    for word in word_re().find_iter(body) {
        let inside = bracketed
            .iter()
            .any(|r| r.start <= word.start() && word.end() <= r.end);
        if !inside && Token::from_name(word.as_str()).is_some() {
            findings.push(LintFinding::BareToken {
                token: word.as_str().to_string(),
                offset: word.start(),
            });
        }
    }

    findings.sort_by_key(|f| match f {
        LintFinding::BareToken { offset, .. } | LintFinding::UnknownPlaceholder { offset, .. } => {
            *offset
        }
    });
    findings
}

pub fn lint_clause(clause: &Clause) -> Vec<LintFinding> {
    lint_body(&clause.body)
}

/// Findings for every clause that has any, keyed by clause ID
pub fn lint_catalog(clauses: &[Clause]) -> Vec<(String, Vec<LintFinding>)> {
    clauses
        .iter()
        .map(|c| (c.id.clone(), lint_clause(c)))
        .filter(|(_, findings)| !findings.is_empty())
        .collect()
}
