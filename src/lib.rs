//! CodePad: the core of a single-document code editor.
//!
//! Preferences and the buffer persist to a key-value store, the buffer is
//! syntax-highlighted to HTML markup, and the content can be exported as a
//! file named after the selected language. The text widget, the host's save
//! action and panel hit-testing stay outside, behind traits.

pub mod app;
