//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Preferences, DocumentBuffer, Messages)
//! - `controllers/` - UI coordination (popover panels)
//! - `services/` - Business operations (persistence, highlighting, export)
//! - `infrastructure/` - External integrations (storage backends, error)
//! - `session.rs` - Owned session state mirrored to storage
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod session;
pub mod state;

// Re-exports for convenient external access
pub use controllers::popover::{ClickTarget, Panel, Point, Popovers, RegionHitTest};
pub use domain::{DocumentBuffer, FontFamily, Language, Message, Preferences};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use services::export::{
    BuiltinExtensionTable, DirectorySink, ExportedFile, ExtensionTable, FileSink,
    SyntectExtensionTable,
};
pub use services::highlight::{HighlightDispatcher, HighlightEngine, Markup, SyntectEngine};
pub use session::EditorSession;
pub use state::{EditorState, EditorView, FontStyle};
