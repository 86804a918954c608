/// The text being edited. Independent of formatting preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuffer {
    text: String,
}

impl DocumentBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole content, as the editor widget reports it after each edit.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// UTF-8 bytes of the content, as written to an exported file.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}
