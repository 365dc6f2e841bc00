//! Transformation map registry
//!
//! Total, table-driven maps over positions, locations and letters, plus
//! their beat-wise application.
//!
//! # Module Structure
//!
//! - [`types`] - Transform names and error definitions
//! - [`position`] - Position tables (mirror, flip, swap, rotations)
//! - [`location`] - Compass-point tables
//! - [`letters`] - Letter-relationship tables
//! - [`apply`] - Beat-wise application of a LOOP step

pub mod apply;
pub mod letters;
pub mod location;
pub mod position;
pub mod types;

// Re-export main types at the module level for convenience
pub use apply::{BeatTransform, Reflection, Rotation, RotationDirection};
pub use letters::{
    alpha_beta_counterpart_letter, compound_letter, inverted_letter, related_letter, ALPHABET,
};
pub use location::{
    horizontal_mirror_location, rotate_location_ccw, rotate_location_cw, rotate_location_half,
    vertical_mirror_location,
};
pub use position::{
    half_rotate, horizontal_mirror_position, quarter_rotate_ccw, quarter_rotate_cw,
    swapped_position, vertical_mirror_position,
};
pub use types::{GridTransform, LetterMap, TransformError};
