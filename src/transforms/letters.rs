//! Letter-relationship tables
//!
//! Each table is an involution over the letter alphabet, written as explicit
//! pairs plus an explicit list of self-paired letters. Nothing is inferred:
//! a letter missing from a table is a data error and the lookup fails with
//! [`TransformError::MissingMapping`].

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::types::{LetterMap, TransformError};

/// Every letter the tables know about, including the dash variants.
pub const ALPHABET: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "Σ", "Δ", "θ", "Ω", "W-", "X-", "Y-", "Z-", "Σ-",
    "Δ-", "θ-", "Ω-", "Φ", "Ψ", "Λ", "Φ-", "Ψ-", "Λ-", "α", "β", "Γ",
];

const INVERTED_PAIRS: &[(&str, &str)] = &[
    ("A", "B"),
    ("D", "E"),
    ("G", "H"),
    ("J", "K"),
    ("M", "N"),
    ("P", "Q"),
    ("S", "T"),
    ("W", "Y"),
    ("X", "Z"),
    ("Σ", "θ"),
    ("Δ", "Ω"),
    ("W-", "Y-"),
    ("X-", "Z-"),
    ("Σ-", "θ-"),
    ("Δ-", "Ω-"),
];

// Mixed pro/anti letters invert onto themselves; dash and static letters
// have no pro/anti to exchange.
const INVERTED_SELF: &[&str] =
    &["C", "F", "I", "L", "O", "R", "U", "V", "Φ", "Ψ", "Λ", "Φ-", "Ψ-", "Λ-", "α", "β", "Γ"];

const COUNTERPART_PAIRS: &[(&str, &str)] = &[
    ("A", "G"),
    ("B", "H"),
    ("C", "I"),
    ("D", "J"),
    ("E", "K"),
    ("F", "L"),
    ("W", "X"),
    ("Y", "Z"),
    ("Σ", "Δ"),
    ("θ", "Ω"),
    ("W-", "X-"),
    ("Y-", "Z-"),
    ("Σ-", "Δ-"),
    ("θ-", "Ω-"),
    ("Φ", "Ψ"),
    ("Φ-", "Ψ-"),
    ("α", "β"),
];

// Gamma-to-gamma letters have no alpha/beta counterpart.
const COUNTERPART_SELF: &[&str] =
    &["M", "N", "O", "P", "Q", "R", "S", "T", "U", "V", "Λ", "Λ-", "Γ"];

const COMPOUND_PAIRS: &[(&str, &str)] = &[
    ("A", "H"),
    ("B", "G"),
    ("C", "I"),
    ("D", "K"),
    ("E", "J"),
    ("F", "L"),
    ("M", "N"),
    ("P", "Q"),
    ("S", "T"),
    ("W", "Z"),
    ("X", "Y"),
    ("Σ", "Ω"),
    ("Δ", "θ"),
    ("W-", "Z-"),
    ("X-", "Y-"),
    ("Σ-", "Ω-"),
    ("Δ-", "θ-"),
    ("Φ", "Ψ"),
    ("Φ-", "Ψ-"),
    ("α", "β"),
];

const COMPOUND_SELF: &[&str] = &["O", "R", "U", "V", "Λ", "Λ-", "Γ"];

fn build(
    pairs: &[(&'static str, &'static str)],
    fixed: &[&'static str],
) -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::with_capacity(pairs.len() * 2 + fixed.len());
    for &(a, b) in pairs {
        map.insert(a, b);
        map.insert(b, a);
    }
    for &f in fixed {
        map.insert(f, f);
    }
    map
}

lazy_static! {
    static ref INVERTED: HashMap<&'static str, &'static str> = build(INVERTED_PAIRS, INVERTED_SELF);
    static ref COUNTERPART: HashMap<&'static str, &'static str> =
        build(COUNTERPART_PAIRS, COUNTERPART_SELF);
    static ref COMPOUND: HashMap<&'static str, &'static str> = build(COMPOUND_PAIRS, COMPOUND_SELF);
}

fn table(map: LetterMap) -> &'static HashMap<&'static str, &'static str> {
    match map {
        LetterMap::Inverted => &*INVERTED,
        LetterMap::Compound => &*COMPOUND,
        LetterMap::Counterpart => &*COUNTERPART,
    }
}

/// Look a letter up in the given relationship table.
pub fn related_letter(map: LetterMap, letter: &str) -> Result<&'static str, TransformError> {
    table(map)
        .get(letter)
        .copied()
        .ok_or_else(|| TransformError::MissingMapping { map, letter: letter.to_string() })
}

/// Letter with pro and anti motions exchanged.
pub fn inverted_letter(letter: &str) -> Result<&'static str, TransformError> {
    related_letter(LetterMap::Inverted, letter)
}

/// Letter with the same motions between the opposite alpha/beta positions.
pub fn alpha_beta_counterpart_letter(letter: &str) -> Result<&'static str, TransformError> {
    related_letter(LetterMap::Counterpart, letter)
}

/// Inversion combined with the alpha/beta counterpart.
pub fn compound_letter(letter: &str) -> Result<&'static str, TransformError> {
    related_letter(LetterMap::Compound, letter)
}

/// Letters explicitly listed as their own partner in the given table.
pub fn self_paired(map: LetterMap) -> &'static [&'static str] {
    match map {
        LetterMap::Inverted => INVERTED_SELF,
        LetterMap::Compound => COMPOUND_SELF,
        LetterMap::Counterpart => COUNTERPART_SELF,
    }
}
