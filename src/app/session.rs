//! The editor session: preferences, buffer and panel state, with every
//! persisted mutation mirrored to storage as it happens.

use crate::app::controllers::popover::Popovers;
use crate::app::domain::buffer::DocumentBuffer;
use crate::app::domain::preferences::{
    self, FontFamily, Language, Preferences, keys, parse_numeric_input,
};
use crate::app::infrastructure::storage::KeyValueStore;
use crate::app::services::persistence::Persistence;

pub struct EditorSession<S> {
    persistence: Persistence<S>,
    preferences: Preferences,
    buffer: DocumentBuffer,
    popovers: Popovers,
}

impl<S: KeyValueStore> EditorSession<S> {
    /// Rehydrate from `store`. Absent or malformed values become defaults.
    pub fn load(store: S) -> Self {
        let persistence = Persistence::new(store);
        let preferences = load_preferences(&persistence);
        let buffer = DocumentBuffer::new(persistence.read_string(keys::CODE, ""));
        log::debug!("Session loaded: {:?}, {} bytes of code", preferences, buffer.len());

        Self {
            persistence,
            preferences,
            buffer,
            popovers: Popovers::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn buffer(&self) -> &DocumentBuffer {
        &self.buffer
    }

    pub fn code(&self) -> &str {
        self.buffer.text()
    }

    pub fn popovers(&self) -> &Popovers {
        &self.popovers
    }

    pub fn popovers_mut(&mut self) -> &mut Popovers {
        &mut self.popovers
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    // --- Buffer ---

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.buffer.set_text(code);
        self.persistence.write(keys::CODE, self.buffer.text());
    }

    // --- Getters ---

    pub fn tab_size(&self) -> u32 {
        self.preferences.tab_size
    }

    pub fn insert_spaces(&self) -> bool {
        self.preferences.insert_spaces
    }

    pub fn ignore_tab_key(&self) -> bool {
        self.preferences.ignore_tab_key
    }

    pub fn padding(&self) -> u32 {
        self.preferences.padding
    }

    pub fn language(&self) -> Language {
        self.preferences.language
    }

    pub fn font_family(&self) -> FontFamily {
        self.preferences.font_family
    }

    pub fn font_size(&self) -> u32 {
        self.preferences.font_size
    }

    // --- Setters ---

    /// Zero is out of range and ignored.
    pub fn set_tab_size(&mut self, tab_size: u32) {
        if tab_size == 0 {
            log::debug!("Ignoring tab size 0");
            return;
        }
        self.preferences.tab_size = tab_size;
        self.persistence.write(keys::TAB_SIZE, tab_size);
    }

    pub fn set_insert_spaces(&mut self, insert_spaces: bool) {
        self.preferences.insert_spaces = insert_spaces;
        self.persistence.write(keys::INSERT_SPACES, insert_spaces);
    }

    pub fn set_ignore_tab_key(&mut self, ignore_tab_key: bool) {
        self.preferences.ignore_tab_key = ignore_tab_key;
        self.persistence.write(keys::IGNORE_TAB_KEY, ignore_tab_key);
    }

    pub fn set_padding(&mut self, padding: u32) {
        self.preferences.padding = padding;
        self.persistence.write(keys::PADDING, padding);
    }

    pub fn set_language(&mut self, language: Language) {
        self.preferences.language = language;
        self.persistence.write(keys::LANGUAGE, language.tag());
    }

    pub fn set_font_family(&mut self, font_family: FontFamily) {
        self.preferences.font_family = font_family;
        self.persistence.write(keys::FONT_FAMILY, font_family.css_value());
    }

    /// Zero is out of range and ignored.
    pub fn set_font_size(&mut self, font_size: u32) {
        if font_size == 0 {
            log::debug!("Ignoring font size 0");
            return;
        }
        self.preferences.font_size = font_size;
        self.persistence.write(keys::FONT_SIZE, font_size);
    }

    // --- Raw control values ---
    //
    // These return false and leave state untouched when the control holds
    // something that isn't a valid value for the field.

    pub fn set_tab_size_input(&mut self, raw: &str) -> bool {
        match parse_numeric_input(raw, 1) {
            Some(v) => {
                self.set_tab_size(v);
                true
            }
            None => reject(keys::TAB_SIZE, raw),
        }
    }

    pub fn set_padding_input(&mut self, raw: &str) -> bool {
        match parse_numeric_input(raw, 0) {
            Some(v) => {
                self.set_padding(v);
                true
            }
            None => reject(keys::PADDING, raw),
        }
    }

    pub fn set_font_size_input(&mut self, raw: &str) -> bool {
        match parse_numeric_input(raw, 1) {
            Some(v) => {
                self.set_font_size(v);
                true
            }
            None => reject(keys::FONT_SIZE, raw),
        }
    }

    pub fn set_language_tag(&mut self, tag: &str) -> bool {
        match Language::from_tag(tag) {
            Some(lang) => {
                self.set_language(lang);
                true
            }
            None => reject(keys::LANGUAGE, tag),
        }
    }

    pub fn set_font_family_value(&mut self, value: &str) -> bool {
        match FontFamily::from_css_value(value) {
            Some(family) => {
                self.set_font_family(family);
                true
            }
            None => reject(keys::FONT_FAMILY, value),
        }
    }

    /// Restore format settings to defaults and empty the buffer.
    /// Font settings and panel visibility are kept.
    pub fn reset(&mut self) {
        self.set_code(String::new());
        self.preferences.reset_format();

        let p = self.preferences;
        self.persistence.write(keys::TAB_SIZE, p.tab_size);
        self.persistence.write(keys::INSERT_SPACES, p.insert_spaces);
        self.persistence.write(keys::IGNORE_TAB_KEY, p.ignore_tab_key);
        self.persistence.write(keys::PADDING, p.padding);
        self.persistence.write(keys::LANGUAGE, p.language.tag());
        log::debug!("Session reset");
    }
}

fn reject(key: &str, raw: &str) -> bool {
    log::debug!("Rejected input for '{}': {:?}", key, raw);
    false
}

fn load_preferences<S: KeyValueStore>(p: &Persistence<S>) -> Preferences {
    let positive = |key: &str, default: u32| match p.read_number(key, default) {
        0 => default,
        v => v,
    };

    Preferences {
        tab_size: positive(keys::TAB_SIZE, preferences::DEFAULT_TAB_SIZE),
        insert_spaces: p.read_bool(keys::INSERT_SPACES, preferences::DEFAULT_INSERT_SPACES),
        ignore_tab_key: p.read_bool(keys::IGNORE_TAB_KEY, preferences::DEFAULT_IGNORE_TAB_KEY),
        padding: p.read_number(keys::PADDING, preferences::DEFAULT_PADDING),
        language: Language::from_tag(&p.read_string(keys::LANGUAGE, Language::Auto.tag()))
            .unwrap_or_default(),
        font_family: FontFamily::from_css_value(
            &p.read_string(keys::FONT_FAMILY, FontFamily::FiraCode.css_value()),
        )
        .unwrap_or_default(),
        font_size: positive(keys::FONT_SIZE, preferences::DEFAULT_FONT_SIZE),
    }
}
