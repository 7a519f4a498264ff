//! Kiln Core - Foundational types for the Kiln engine
//!
//! This crate provides the types that all other Kiln crates depend on:
//! - `KilnError` - Error taxonomy for engine operations
//! - `Result` - Result alias used throughout the workspace

mod error;

pub use error::{KilnError, Result};
