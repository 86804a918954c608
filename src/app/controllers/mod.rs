//! Controllers layer - UI coordination.
//!
//! - Popover panels (Format, Font) and outside-click dismissal

pub mod popover;
