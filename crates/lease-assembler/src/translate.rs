//! Translation seam
//!
//! The assembler never reaches for an active-language singleton. Callers pass a
//! [`Translate`] implementation; any `Fn(&str) -> String` qualifies.

use lease_types::MaritalStatus;

/// Look up display text for a translation key
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Minimal translator covering the marital-status codes only
///
/// Useful in tests and for callers that do not carry a full string table.
/// Unknown keys are echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaritalStatusWords {
    pub single: String,
    pub married: String,
}

impl MaritalStatusWords {
    pub fn portuguese() -> Self {
        Self {
            single: "solteiro(a)".to_string(),
            married: "casado(a)".to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            single: "single".to_string(),
            married: "married".to_string(),
        }
    }
}

impl Translate for MaritalStatusWords {
    fn translate(&self, key: &str) -> String {
        match MaritalStatus::from_code(key) {
            Some(MaritalStatus::Single) => self.single.clone(),
            Some(MaritalStatus::Married) => self.married.clone(),
            None => key.to_string(),
        }
    }
}
