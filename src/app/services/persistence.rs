use std::fmt::Display;

use crate::app::domain::preferences::parse_numeric_input;
use crate::app::infrastructure::storage::KeyValueStore;

/// Typed access to a [`KeyValueStore`] that never fails.
///
/// Every value is stored as its string form. Backend errors are logged and
/// absorbed: reads fall back to the caller's default, writes are dropped.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn write(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        if let Err(e) = self.store.set(key, &value) {
            log::warn!("Failed to persist '{}': {}", key, e);
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read '{}': {}. Using default.", key, e);
                None
            }
        }
    }

    pub fn read_string(&self, key: &str, default: &str) -> String {
        self.read_raw(key).unwrap_or_else(|| default.to_string())
    }

    /// Parsed value, or `default` when absent or unparsable. Uses the same
    /// rule as the numeric controls, so `"4.0"` and `"1e1"` are accepted.
    pub fn read_number(&self, key: &str, default: u32) -> u32 {
        match self.read_raw(key) {
            Some(raw) => parse_numeric_input(&raw, 0).unwrap_or_else(|| {
                log::debug!("Ignoring malformed value for '{}': {:?}", key, raw);
                default
            }),
            None => default,
        }
    }

    /// `true` only for the exact string `"true"`; absent keys yield `default`.
    pub fn read_bool(&self, key: &str, default: bool) -> bool {
        match self.read_raw(key) {
            Some(raw) => raw == "true",
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::storage::MemoryStore;

    #[test]
    fn test_write_stores_string_form() {
        let mut p = Persistence::new(MemoryStore::new());
        p.write("tabSize", 4u32);
        p.write("insertSpaces", false);
        assert_eq!(p.store().get("tabSize").unwrap(), Some("4".to_string()));
        assert_eq!(p.store().get("insertSpaces").unwrap(), Some("false".to_string()));
    }

    #[test]
    fn test_read_string_default() {
        let p = Persistence::new(MemoryStore::with_entries([("language", "css")]));
        assert_eq!(p.read_string("language", "auto"), "css");
        assert_eq!(p.read_string("fontFamily", "Fira Code"), "Fira Code");
    }

    #[test]
    fn test_read_number_malformed_uses_default() {
        let p = Persistence::new(MemoryStore::with_entries([
            ("tabSize", "abc"),
            ("padding", ""),
            ("fontSize", " 18 "),
        ]));
        assert_eq!(p.read_number("tabSize", 2), 2);
        assert_eq!(p.read_number("padding", 0), 0);
        assert_eq!(p.read_number("fontSize", 14), 18);
        assert_eq!(p.read_number("missing", 7), 7);
    }

    #[test]
    fn test_read_number_accepts_integral_floats() {
        let p = Persistence::new(MemoryStore::with_entries([
            ("tabSize", "4.0"),
            ("fontSize", "1e1"),
            ("padding", "2.5"),
        ]));
        assert_eq!(p.read_number("tabSize", 2), 4);
        assert_eq!(p.read_number("fontSize", 14), 10);
        assert_eq!(p.read_number("padding", 0), 0);
    }

    #[test]
    fn test_read_bool_exact_match() {
        let p = Persistence::new(MemoryStore::with_entries([
            ("a", "true"),
            ("b", "TRUE"),
            ("c", "1"),
            ("d", "false"),
        ]));
        assert!(p.read_bool("a", false));
        assert!(!p.read_bool("b", true));
        assert!(!p.read_bool("c", true));
        assert!(!p.read_bool("d", true));
        assert!(p.read_bool("absent", true));
        assert!(!p.read_bool("absent", false));
    }

    #[test]
    fn test_unavailable_backend_degrades() {
        let mut p = Persistence::new(MemoryStore::unavailable());
        p.write("code", "print(1)");
        assert_eq!(p.read_string("code", ""), "");
        assert_eq!(p.read_number("tabSize", 2), 2);
        assert!(p.read_bool("insertSpaces", true));
    }
}
