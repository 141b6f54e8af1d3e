//! Lease Contracts
//!
//! Residential lease contract generation on top of the pure
//! [`lease_assembler`] crate. This crate adds the parts that touch the
//! outside world:
//!
//! - [`store`]: JSON record collections (landlords, properties, clauses,
//!   templates, generated contracts) over a pluggable key-value backend
//! - [`catalog`]: the built-in Portuguese clause catalog and YAML loaders
//! - [`generation`]: request validation, contract generation and snapshots
//! - [`backup`]: whole-store JSON export and import
//! - [`export`]: printable HTML with signature blocks
//! - [`lint`]: clause authoring checks for placeholders that will not fire
//!
//! ## Quick Start
//!
//! ```rust
//! use lease_contracts::catalog::{default_clauses, default_template};
//! use lease_contracts::i18n::{Language, Translations};
//! use lease_contracts::{format_contract, GenerationContext, PersonData};
//!
//! let ctx = GenerationContext {
//!     tenant: PersonData::new("Maria Silva"),
//!     monthly_rent: "1.500,00".into(),
//!     ..Default::default()
//! }
//! .with_template(default_template());
//!
//! let text = format_contract(&ctx, &default_clauses(), &Translations::new(Language::Pt));
//! assert!(text.contains("CLÁUSULA PRIMEIRA"));
//! ```

// Core error handling
pub mod error;

// Runtime configuration and string tables
pub mod config;
pub mod i18n;

// Persistence
pub mod backup;
pub mod store;

// Clause catalogs and authoring checks
pub mod catalog;
pub mod lint;

// Contract generation and rendering
pub mod export;
pub mod generation;

pub use error::{LeaseError, Result};

pub use lease_assembler::{format_contract, ordinal_word, Token, TokenMap, Translate};
pub use lease_types::{
    Clause, ClauseCategory, ContractTemplate, GeneratedContract, GenerationContext,
    LandlordProfile, MaritalStatus, PersonData, PropertyData, PropertyProfile,
};
