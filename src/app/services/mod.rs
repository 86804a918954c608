//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Typed persistence over a key-value store
//! - Syntax highlighting
//! - File export

pub mod export;
pub mod highlight;
pub mod persistence;
