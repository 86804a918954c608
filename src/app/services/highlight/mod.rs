//! Syntax highlighting: picks auto-detection or a forced language and asks
//! the engine for markup.

pub mod detect;
mod syntect_engine;

pub use syntect_engine::SyntectEngine;

use crate::app::domain::preferences::Language;
use crate::app::infrastructure::error::Result;

/// Highlighted HTML for the editor widget to lay over its text area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Unhighlighted text, escaped so it renders verbatim.
    pub fn plain(text: &str) -> Self {
        Self(escape_html(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The tokenizer/renderer the dispatcher delegates to.
pub trait HighlightEngine {
    /// Guess the language and highlight with it.
    fn highlight_auto(&self, text: &str) -> Markup;

    /// Highlight as `language`. Fails for tags the engine doesn't know.
    fn highlight(&self, text: &str, language: &str) -> Result<Markup>;
}

pub struct HighlightDispatcher<E> {
    engine: E,
}

impl<E: HighlightEngine> HighlightDispatcher<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Render `text` for the current language selection. Never fails: an
    /// engine error degrades to plain text for this pass.
    pub fn render(&self, text: &str, language: Language) -> Markup {
        if text.is_empty() {
            return Markup::default();
        }

        if language.is_auto() {
            return self.engine.highlight_auto(text);
        }

        match self.engine.highlight(text, language.tag()) {
            Ok(markup) => markup,
            Err(e) => {
                log::debug!("Falling back to plain text: {}", e);
                Markup::plain(text)
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
