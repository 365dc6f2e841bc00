//! Configuration module for beatloop
//!
//! Provides types, discovery and parsing for `beatloop.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
