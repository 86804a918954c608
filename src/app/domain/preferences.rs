/// Storage keys, one per persisted field.
pub mod keys {
    pub const CODE: &str = "code";
    pub const TAB_SIZE: &str = "tabSize";
    pub const INSERT_SPACES: &str = "insertSpaces";
    pub const IGNORE_TAB_KEY: &str = "ignoreTabKey";
    pub const PADDING: &str = "padding";
    pub const LANGUAGE: &str = "language";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_SIZE: &str = "fontSize";
}

/// Languages offered in the Format panel. `Auto` lets the highlighter guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Auto,
    JavaScript,
    Python,
    Html,
    Css,
    Java,
}

impl Language {
    /// Stored tag, also the name handed to the highlighting engine
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Html => "html",
            Self::Css => "css",
            Self::Java => "java",
        }
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Java => "Java",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.tag() == tag)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// All choices, in menu order
    pub fn all() -> &'static [Language] {
        &[
            Self::Auto,
            Self::JavaScript,
            Self::Python,
            Self::Html,
            Self::Css,
            Self::Java,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    FiraCode,
    JetBrainsMono,
    Consolas,
}

impl FontFamily {
    /// Font stack handed to the editor widget; this is also the stored value.
    pub fn css_value(&self) -> &'static str {
        match self {
            Self::FiraCode => "Fira Code",
            Self::JetBrainsMono => "JetBrains Mono",
            Self::Consolas => "Consolas, monaco, monospace",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FiraCode => "Fira Code",
            Self::JetBrainsMono => "JetBrains Mono",
            Self::Consolas => "Consolas",
        }
    }

    pub fn from_css_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.css_value() == value)
    }

    pub fn all() -> &'static [FontFamily] {
        &[Self::FiraCode, Self::JetBrainsMono, Self::Consolas]
    }
}

pub const DEFAULT_TAB_SIZE: u32 = 2;
pub const DEFAULT_INSERT_SPACES: bool = true;
pub const DEFAULT_IGNORE_TAB_KEY: bool = false;
pub const DEFAULT_PADDING: u32 = 0;
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// User-adjustable formatting and display settings.
///
/// Numeric fields are kept in range by construction: `tab_size` and
/// `font_size` are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub tab_size: u32,
    pub insert_spaces: bool,
    pub ignore_tab_key: bool,
    pub padding: u32,
    pub language: Language,
    pub font_family: FontFamily,
    pub font_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            insert_spaces: DEFAULT_INSERT_SPACES,
            ignore_tab_key: DEFAULT_IGNORE_TAB_KEY,
            padding: DEFAULT_PADDING,
            language: Language::default(),
            font_family: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Preferences {
    /// Restore the Format panel fields. Font settings are left as they are.
    pub fn reset_format(&mut self) {
        let defaults = Self::default();
        self.tab_size = defaults.tab_size;
        self.insert_spaces = defaults.insert_spaces;
        self.ignore_tab_key = defaults.ignore_tab_key;
        self.padding = defaults.padding;
        self.language = defaults.language;
    }
}

/// Parse a raw numeric control value. Accepts surrounding whitespace and
/// integral floats like `"4.0"`; rejects anything below `min`.
pub fn parse_numeric_input(raw: &str, min: u32) -> Option<u32> {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            let f = trimmed.parse::<f64>().ok()?;
            if !f.is_finite() || f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                return None;
            }
            f as u32
        }
    };
    (value >= min).then_some(value)
}
