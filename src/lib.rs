//! Beatloop - LOOP transformation algebra for beat sequences
//!
//! This library provides functionality to:
//! - Transform grid positions, hand locations and letters under rotation,
//!   reflection, hand swap and motion inversion
//! - Detect which LOOP pattern a completed sequence follows
//! - Plan and generate the beats that close a partial sequence into a LOOP

pub mod cli;
pub mod config;
pub mod detect;
pub mod extend;
pub mod loops;
pub mod models;
pub mod registry;
pub mod transforms;
pub mod validate;
