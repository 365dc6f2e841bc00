//! Registry traits and implementations for keyed items.
//!
//! This module provides:
//! - A unified `Registry` trait for consistent registry interfaces
//! - `LoopExecutor`, the contract for generating a LOOP's closing beats
//! - `TransformExecutor`, the table-driven executor for every component LOOP type
//! - `ExecutorRegistry` for selecting an executor by LOOP type

mod executor;
mod traits;

// Re-export all public items from submodules
pub use executor::{ExecutorRegistry, LoopExecutor, TransformExecutor};
pub use traits::Registry;
