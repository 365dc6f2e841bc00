//! LOOP types, their components and closing-position tables.
//!
//! - [`types`] - Components, component sets, LOOP types, slice sizes
//! - [`resolver`] - Component set ↔ LOOP type mapping and display names
//! - [`validation`] - Valid (start, end) pairs per LOOP type

pub mod resolver;
pub mod types;
pub mod validation;

pub use resolver::{
    format_for_display, format_name_for_display, generate_loop_type, is_implemented,
    parse_components, parse_components_str, Resolution,
};
pub use types::{ComponentSet, LoopComponent, LoopType, SliceSize};
pub use validation::{validation_sets, PairSet, ValidationSets};
