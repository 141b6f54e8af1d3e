//! Portuguese feminine ordinals for clause numbering
//!
//! "CLÁUSULA" is feminine, so positions render as PRIMEIRA, SEGUNDA, ...
//! Words are composed from hundreds, tens and units: 111 is
//! "CENTÉSIMA DÉCIMA PRIMEIRA".

/// Highest position rendered in words
pub const MAX_ORDINAL: i64 = 999;

const UNITS: [&str; 9] = [
    "PRIMEIRA", "SEGUNDA", "TERCEIRA", "QUARTA", "QUINTA", "SEXTA", "SÉTIMA", "OITAVA", "NONA",
];

const TENS: [&str; 9] = [
    "DÉCIMA",
    "VIGÉSIMA",
    "TRIGÉSIMA",
    "QUADRAGÉSIMA",
    "QUINQUAGÉSIMA",
    "SEXAGÉSIMA",
    "SEPTUAGÉSIMA",
    "OCTOGÉSIMA",
    "NONAGÉSIMA",
];

const HUNDREDS: [&str; 9] = [
    "CENTÉSIMA",
    "DUCENTÉSIMA",
    "TRICENTÉSIMA",
    "QUADRINGENTÉSIMA",
    "QUINGENTÉSIMA",
    "SEXCENTÉSIMA",
    "SEPTINGENTÉSIMA",
    "OCTINGENTÉSIMA",
    "NONGENTÉSIMA",
];

/// Spell out a 1-based position as an upper-case feminine ordinal
///
/// Out of range (below 1 or above [`MAX_ORDINAL`]) renders numerically, e.g. "0ª".
pub fn ordinal_word(n: i64) -> String {
    if !(1..=MAX_ORDINAL).contains(&n) {
        return format!("{n}ª");
    }

    let digits = [n / 100, (n / 10) % 10, n % 10];
    let tables = [&HUNDREDS, &TENS, &UNITS];

    digits
        .iter()
        .zip(tables)
        .filter(|(digit, _)| **digit > 0)
        .map(|(digit, table)| table[(*digit - 1) as usize])
        .collect::<Vec<_>>()
        .join(" ")
}
