//! String tables for the supported languages
//!
//! Only the strings the contract pipeline needs live here: marital-status
//! words consumed by the assembler, and the labels used by the HTML export.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lease_assembler::Translate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region-qualified tags like "pt-BR" or "en_US"
        let base = s.trim().split(['-', '_']).next().unwrap_or("").to_lowercase();
        match base.as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            _ => Err(format!("unsupported language '{}'", s)),
        }
    }
}

const PT: &[(&str, &str)] = &[
    ("single", "solteiro(a)"),
    ("married", "casado(a)"),
    ("contractTitle", "CONTRATO DE LOCAÇÃO RESIDENCIAL"),
    ("landlord", "LOCADOR"),
    ("tenant", "LOCATÁRIO"),
    ("guarantor", "FIADOR"),
    ("witnesses", "TESTEMUNHAS"),
];

const EN: &[(&str, &str)] = &[
    ("single", "single"),
    ("married", "married"),
    ("contractTitle", "RESIDENTIAL LEASE AGREEMENT"),
    ("landlord", "LANDLORD"),
    ("tenant", "TENANT"),
    ("guarantor", "GUARANTOR"),
    ("witnesses", "WITNESSES"),
];

/// Translation table for one language, falling back to Portuguese
#[derive(Debug, Clone)]
pub struct Translations {
    language: Language,
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new(language: Language) -> Self {
        let mut strings: HashMap<_, _> = PT.iter().copied().collect();
        if language == Language::En {
            strings.extend(EN.iter().copied());
        }
        Self { language, strings }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translated text, or `None` if the key is unknown
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Translate for Translations {
    fn translate(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("pt-BR".parse::<Language>(), Ok(Language::Pt));
        assert_eq!("en_US".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_marital_words_per_language() {
        assert_eq!(Translations::new(Language::Pt).translate("married"), "casado(a)");
        assert_eq!(Translations::new(Language::En).translate("married"), "married");
    }

    #[test]
    fn test_unknown_key_echoed() {
        assert_eq!(Translations::default().translate("nope"), "nope");
    }
}
