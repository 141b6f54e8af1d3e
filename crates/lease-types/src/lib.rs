//! Lease Types - Level 1 Foundation Types
//!
//! Pure data structures shared by the contract assembler, the record store and
//! the generation service. Nothing in here performs I/O or depends on another
//! workspace crate.
//!
//! ## Contents
//!
//! - Parties and properties (`PersonData`, `PropertyData` and their stored profiles)
//! - Clause catalog records (`Clause`, `ContractTemplate`)
//! - The assembler input (`GenerationContext`)
//! - The persisted result (`GeneratedContract`)
//!
//! ## Wire shape
//!
//! All records serialize with camelCase field names, matching existing store
//! files and backups. Every text field
//! defaults to the empty string; a missing field is never an error.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ============================================================================
// PARTIES
// ============================================================================

/// Marital status of a party, stored as a language-neutral code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    /// The stable code, also used as the translation key
    pub fn code(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            _ => None,
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A party to the contract: landlord, tenant or guarantor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonData {
    /// Full legal name
    pub name: String,
    pub nationality: String,
    /// `None` when not chosen yet; unknown codes and "" also read as `None`
    #[serde(alias = "maitalStatus", deserialize_with = "lenient_marital_status")]
    pub marital_status: Option<MaritalStatus>,
    /// National ID number (RG)
    pub rg: String,
    /// Taxpayer ID number (CPF)
    pub cpf: String,
    pub birthplace: String,
}

impl PersonData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when the party has a non-blank name
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

fn lenient_marital_status<'de, D>(deserializer: D) -> Result<Option<MaritalStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(MaritalStatus::from_code))
}

// ============================================================================
// PROPERTIES
// ============================================================================

/// A rental unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyData {
    /// Free-text description ("casa", "apartamento térreo", ...)
    pub description: String,
    pub street: String,
    /// House or unit number
    pub number: String,
    pub zip_code: String,
    pub neighborhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Two-letter state code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
}

/// Stored landlord profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandlordProfile {
    pub id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    pub data: PersonData,
}

impl LandlordProfile {
    pub fn new(data: PersonData) -> Self {
        Self {
            id: new_record_id(),
            created_at: Utc::now(),
            data,
        }
    }
}

/// Stored property profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyProfile {
    pub id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    pub data: PropertyData,
}

impl PropertyProfile {
    pub fn new(data: PropertyData) -> Self {
        Self {
            id: new_record_id(),
            created_at: Utc::now(),
            data,
        }
    }
}

/// Fresh random identifier for a stored record
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// CLAUSES AND TEMPLATES
// ============================================================================

/// Advisory clause category. Has no effect on assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseCategory {
    #[default]
    Obligatory,
    Optional,
}

/// A reusable legal paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: String,
    /// Shown in management screens only, never emitted into a contract
    #[serde(default)]
    pub title: String,
    /// Body text with `{TOKEN}`, `[TOKEN]` or `${TOKEN}` placeholders
    #[serde(rename = "content", alias = "body", default)]
    pub body: String,
    #[serde(default)]
    pub category: ClauseCategory,
}

impl Clause {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            category: ClauseCategory::Obligatory,
        }
    }

    pub fn optional(mut self) -> Self {
        self.category = ClauseCategory::Optional;
        self
    }
}

/// A named, ordered selection of clause IDs
///
/// Owns no clause content. IDs may dangle after the catalog is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub clause_ids: Vec<String>,
    #[serde(default)]
    pub has_guarantor: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl ContractTemplate {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, clause_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            clause_ids: clause_ids.into_iter().map(Into::into).collect(),
            has_guarantor: false,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn with_guarantor(mut self) -> Self {
        self.has_guarantor = true;
        self
    }
}

// ============================================================================
// GENERATION CONTEXT
// ============================================================================

/// Everything the assembler needs to render one contract
///
/// Parties and property are held by value. Only the guarantor and the template
/// are genuinely optional; a missing template means "nothing to render yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    pub landlord: PersonData,
    pub property: PropertyData,
    pub tenant: PersonData,
    pub guarantor: Option<PersonData>,
    pub template: Option<ContractTemplate>,
    #[serde(deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    /// Locale-formatted amount, e.g. "1500,00" or "1.500,00"
    pub monthly_rent: String,
    #[serde(deserialize_with = "lenient_due_day")]
    pub due_day: Option<u8>,
    pub contract_location: String,
}

impl GenerationContext {
    pub fn with_template(mut self, template: ContractTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// The guarantor, but only when one is actually named
    pub fn named_guarantor(&self) -> Option<&PersonData> {
        self.guarantor.as_ref().filter(|g| g.is_named())
    }
}

/// Accepts the due day as a number or as text ("5"). Anything else reads as `None`.
fn lenient_due_day<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) => u8::try_from(n).ok(),
        Some(Raw::Float(f)) if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) => {
            Some(f as u8)
        }
        Some(Raw::Text(s)) => s.trim().parse::<u8>().ok(),
        Some(Raw::Float(_)) | Some(Raw::Other(_)) | None => None,
    })
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping the date part.
/// Blank text reads as `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}

// ============================================================================
// GENERATED CONTRACTS
// ============================================================================

/// A contract as persisted after generation
///
/// Tenant, guarantor and property are snapshots taken at generation time.
/// Template and landlord are referenced by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    pub id: String,
    pub template_id: String,
    pub landlord_id: String,
    pub tenant: PersonData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guarantor: Option<PersonData>,
    pub property: PropertyData,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_rent: String,
    #[serde(default, deserialize_with = "lenient_due_day")]
    pub due_day: Option<u8>,
    #[serde(default)]
    pub contract_location: String,
    pub generated_at: DateTime<Utc>,
    /// Rendered text. When present it is the contract, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_content: Option<String>,
}

impl GeneratedContract {
    /// Rebuild an assembler context from the snapshot
    pub fn to_context(&self, landlord: PersonData, template: ContractTemplate) -> GenerationContext {
        GenerationContext {
            landlord,
            property: self.property.clone(),
            tenant: self.tenant.clone(),
            guarantor: self.guarantor.clone(),
            template: Some(template),
            start_date: self.start_date,
            end_date: self.end_date,
            monthly_rent: self.monthly_rent.clone(),
            due_day: self.due_day,
            contract_location: self.contract_location.clone(),
        }
    }
}

// ============================================================================
// MONEY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid rent amount '{input}'")]
pub struct RentParseError {
    pub input: String,
}

/// Parse a locale-formatted rent amount
///
/// Accepts the Brazilian convention ("1.500,00", "1500,00", "1.500"), the
/// plain decimal convention ("1500.00") and an optional "R$" prefix. Without
/// a comma, dots are read as thousands separators only when every group after
/// the first has exactly three digits, so "1.500" is 1500 and "1.50" is 1.5.
pub fn parse_rent(input: &str) -> Result<Decimal, RentParseError> {
    let err = || RentParseError {
        input: input.to_string(),
    };

    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(err());
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if has_thousands_groups(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).map_err(|_| err())
}

/// "1.500", "12.345.678": a 1-3 digit lead followed by dot-separated groups of three
fn has_thousands_groups(text: &str) -> bool {
    let mut groups = text.split('.');
    let lead_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    let rest: Vec<&str> = groups.collect();
    lead_ok
        && !rest.is_empty()
        && rest
            .iter()
            .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}
