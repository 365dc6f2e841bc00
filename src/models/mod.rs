//! Data models for positions, beats and sequences

mod beat;
mod grid;

// Re-export all public types
pub use beat::{Beat, MotionEndpoint, MotionType, Motions, Orientation, Sequence};
pub use grid::{GridLocation, GridPosition, PositionGroup};
