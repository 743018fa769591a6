//! Core type definitions for the context assembler.
//!
//! This module contains the value records the engine consumes and produces,
//! organized into sub-modules for packages and external search.

pub mod package;
pub mod search;

// Re-export commonly used types
pub use package::*;
pub use search::*;
