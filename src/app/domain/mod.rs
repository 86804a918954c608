//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Preference record, languages and font families
//! - The document buffer
//! - Message types for the event system

pub mod buffer;
pub mod messages;
pub mod preferences;

pub use buffer::DocumentBuffer;
pub use messages::Message;
pub use preferences::{FontFamily, Language, Preferences};
