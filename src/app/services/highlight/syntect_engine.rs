use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::detect::sniff_language;
use super::{HighlightEngine, Markup};
use crate::app::infrastructure::error::{AppError, Result};

const DEFAULT_THEME: &str = "InspiredGitHub";

/// [`HighlightEngine`] backed by syntect's bundled syntaxes, emitting
/// class-based HTML (`<span class="source python">…`).
pub struct SyntectEngine {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl SyntectEngine {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: DEFAULT_THEME.to_string(),
        }
    }

    /// Switch the theme used by [`SyntectEngine::stylesheet`]. Unknown names are ignored.
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.theme_set.themes.contains_key(theme_name) {
            self.theme_name = theme_name.to_string();
            true
        } else {
            false
        }
    }

    /// CSS matching the classes in the generated markup.
    pub fn stylesheet(&self) -> Result<String> {
        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| AppError::Highlight(format!("missing theme {}", self.theme_name)))?;
        css_for_theme_with_class_style(theme, ClassStyle::Spaced)
            .map_err(|e| AppError::Highlight(e.to_string()))
    }

    /// Look a language up by token, then extension, then name.
    pub fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        let ss = &self.syntax_set;
        ss.find_syntax_by_token(language)
            .or_else(|| ss.find_syntax_by_extension(language))
            .or_else(|| ss.find_syntax_by_name(language))
            .or_else(|| {
                let want = language.to_ascii_lowercase();
                ss.syntaxes()
                    .iter()
                    .find(|s| s.name.to_ascii_lowercase() == want)
            })
    }

    fn detect_syntax(&self, text: &str) -> &SyntaxReference {
        let ss = &self.syntax_set;
        sniff_language(text)
            .and_then(|lang| self.find_syntax(lang.tag()))
            .or_else(|| {
                text.lines()
                    .next()
                    .and_then(|first| ss.find_syntax_by_first_line(first))
            })
            .unwrap_or_else(|| ss.find_syntax_plain_text())
    }

    fn render(&self, text: &str, syntax: &SyntaxReference) -> Result<Markup> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(text) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| AppError::Highlight(e.to_string()))?;
        }
        Ok(Markup::new(generator.finalize()))
    }
}

impl Default for SyntectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightEngine for SyntectEngine {
    fn highlight_auto(&self, text: &str) -> Markup {
        let syntax = self.detect_syntax(text);
        log::debug!("Auto-detected syntax: {}", syntax.name);
        self.render(text, syntax).unwrap_or_else(|e| {
            log::debug!("Auto highlight failed: {}", e);
            Markup::plain(text)
        })
    }

    fn highlight(&self, text: &str, language: &str) -> Result<Markup> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| AppError::UnknownLanguage(language.to_string()))?;
        self.render(text, syntax)
    }
}
