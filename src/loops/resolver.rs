//! Mapping between component sets and LOOP types.
//!
//! Which 3- and 4-component combinations exist is a product decision, not a
//! mathematical one: every combination of the four components is a
//! well-defined transformation, but only the ones on the allow-lists below
//! are implemented. Everything else resolves to [`LoopType::StrictRotated`]
//! with [`Resolution::defaulted`] set.

use serde::Serialize;
use tracing::warn;

use super::types::{ComponentSet, LoopComponent, LoopType};
use LoopComponent::{Inverted, Mirrored, Rotated, Swapped};

/// Implemented three-component combinations.
pub const IMPLEMENTED_TRIPLES: &[ComponentSet] = &[ComponentSet::of(&[Mirrored, Inverted, Rotated])];

/// Implemented four-component combinations.
pub const IMPLEMENTED_QUADS: &[ComponentSet] =
    &[ComponentSet::of(&[Mirrored, Rotated, Inverted, Swapped])];

/// Fallback for component sets with no implemented type.
pub const FALLBACK_LOOP_TYPE: LoopType = LoopType::StrictRotated;

/// Outcome of [`generate_loop_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub loop_type: LoopType,
    /// The component set had no implemented type and `loop_type` is the fallback.
    pub defaulted: bool,
}

/// Components of a LOOP type. `None` yields the empty set.
pub fn parse_components(loop_type: Option<LoopType>) -> ComponentSet {
    loop_type.map(|t| t.components()).unwrap_or_default()
}

/// Components named by a serialized identifier.
///
/// Catalogue names resolve through [`LoopType::components`]. Other names
/// are split on `_`/`+` and each whole word is matched against the component
/// names, so `"unrotated"` never counts as `rotated`.
pub fn parse_components_str(name: &str) -> ComponentSet {
    if let Ok(loop_type) = name.parse::<LoopType>() {
        return loop_type.components();
    }
    name.split(|c| c == '_' || c == '+' || c == '-' || c == ' ')
        .filter_map(|word| word.parse::<LoopComponent>().ok())
        .collect()
}

/// Whether a component combination has an implemented LOOP type.
pub fn is_implemented(components: ComponentSet) -> bool {
    match components.len() {
        0..=2 => true,
        3 => IMPLEMENTED_TRIPLES.contains(&components),
        4 => IMPLEMENTED_QUADS.contains(&components),
        _ => false,
    }
}

fn lookup(components: ComponentSet) -> Option<LoopType> {
    if !is_implemented(components) || components.is_empty() {
        return None;
    }
    LoopType::ALL.into_iter().find(|t| *t != LoopType::Rewound && t.components() == components)
}

/// Canonical LOOP type for a component set.
///
/// Sets without an implemented type (including the empty set) resolve to
/// [`FALLBACK_LOOP_TYPE`] with `defaulted` set, and the fallback is logged.
pub fn generate_loop_type(components: ComponentSet) -> Resolution {
    match lookup(components) {
        Some(loop_type) => Resolution { loop_type, defaulted: false },
        None => {
            warn!(
                components = %components,
                fallback = %FALLBACK_LOOP_TYPE,
                "no implemented LOOP type for component set, using fallback"
            );
            Resolution { loop_type: FALLBACK_LOOP_TYPE, defaulted: true }
        }
    }
}

/// Humanize a LOOP type for display.
///
/// Underscores become spaces and each word is title-cased. Names longer than
/// 20 characters with more than two words collapse to `"{first} + {n} more"`.
pub fn format_for_display(loop_type: LoopType) -> String {
    format_name_for_display(loop_type.as_str(), 20, 2)
}

/// [`format_for_display`] over any identifier with explicit thresholds.
pub fn format_name_for_display(name: &str, max_len: usize, max_words: usize) -> String {
    let words: Vec<String> = name.split('_').filter(|w| !w.is_empty()).map(title_case).collect();
    let full = words.join(" ");
    if full.chars().count() > max_len && words.len() > max_words {
        format!("{} + {} more", words[0], words.len() - 1)
    } else {
        full
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
