//! Lease Contract Assembler
//!
//! Turns a [`GenerationContext`] and a clause catalog into the final contract
//! text. Pure and deterministic: no I/O, no clock, no global state. The only
//! outside input is the translation function used for marital-status words.
//!
//! Key concepts:
//! - A closed vocabulary of [`Token`]s, substituted only when bracketed as
//!   `{TOKEN}`, `[TOKEN]` or `${TOKEN}`
//! - Clauses are taken in template order; dangling IDs are skipped
//! - Clauses are numbered with feminine Portuguese ordinals ("CLÁUSULA PRIMEIRA")
//! - The party header is written straight from the context, not via tokens
//!
//! # Example
//!
//! ```
//! use lease_assembler::{format_contract, MaritalStatusWords};
//! use lease_types::{Clause, ContractTemplate, GenerationContext, PersonData};
//!
//! let clauses = vec![Clause::new("rent", "Aluguel", "O aluguel é de R$ {RENT}.")];
//! let ctx = GenerationContext {
//!     tenant: PersonData::new("Maria Silva"),
//!     monthly_rent: "1500,00".into(),
//!     ..Default::default()
//! }
//! .with_template(ContractTemplate::new("t1", "Padrão", ["rent"]));
//!
//! let text = format_contract(&ctx, &clauses, &MaritalStatusWords::portuguese());
//! assert!(text.ends_with("CLÁUSULA PRIMEIRA: O aluguel é de R$ 1500,00."));
//! ```

mod assembler;
mod header;
mod ordinal;
mod resolve;
mod substitute;
mod token;
mod translate;

pub use assembler::{format_contract, render_clause, CLAUSE_SEPARATOR};
pub use header::{build_header, party_paragraph, PartyRole};
pub use ordinal::{ordinal_word, MAX_ORDINAL};
pub use resolve::resolve_clauses;
pub use substitute::substitute;
pub use token::{build_token_map, Token, TokenMap, DATE_FORMAT};
pub use translate::{MaritalStatusWords, Translate};

pub use lease_types::GenerationContext;
