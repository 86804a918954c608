use std::fs;
use std::path::{Path, PathBuf};

use syntect::parsing::SyntaxSet;

use crate::app::domain::buffer::DocumentBuffer;
use crate::app::domain::preferences::Language;
use crate::app::infrastructure::error::{AppError, Result};

/// Base name of every exported file.
pub const EXPORT_STEM: &str = "myCode";
/// Extension used for auto mode and for languages without a known extension.
pub const FALLBACK_EXTENSION: &str = "txt";
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Language → file extension lookup.
pub trait ExtensionTable {
    /// Extensions for `language`, most common first. May be empty.
    fn extensions_for(&self, language: &str) -> Vec<String>;
}

/// Extensions as listed by syntect's bundled syntax definitions.
pub struct SyntectExtensionTable {
    syntax_set: SyntaxSet,
}

impl SyntectExtensionTable {
    pub fn new() -> Self {
        Self::from_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    pub fn from_syntax_set(syntax_set: SyntaxSet) -> Self {
        Self { syntax_set }
    }
}

impl Default for SyntectExtensionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionTable for SyntectExtensionTable {
    fn extensions_for(&self, language: &str) -> Vec<String> {
        let want = language.to_ascii_lowercase();
        self.syntax_set
            .syntaxes()
            .iter()
            .find(|s| s.name.to_ascii_lowercase() == want)
            .map(|s| s.file_extensions.clone())
            .unwrap_or_default()
    }
}

/// Fixed table covering the languages offered in the Format panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinExtensionTable;

impl ExtensionTable for BuiltinExtensionTable {
    fn extensions_for(&self, language: &str) -> Vec<String> {
        let exts: &[&str] = match language {
            "javascript" => &["js", "mjs", "cjs", "jsx"],
            "python" => &["py", "pyw", "pyi"],
            "html" => &["html", "htm", "xhtml"],
            "css" => &["css"],
            "java" => &["java"],
            _ => &[],
        };
        exts.iter().map(|e| e.to_string()).collect()
    }
}

/// A file ready to hand to the host's save action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn extension(&self) -> &str {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(FALLBACK_EXTENSION)
    }
}

/// Extension to save `language` under.
pub fn extension_for(language: Language, table: &impl ExtensionTable) -> String {
    if language.is_auto() {
        return FALLBACK_EXTENSION.to_string();
    }

    match table.extensions_for(language.tag()).into_iter().next() {
        Some(ext) if !ext.is_empty() => ext,
        _ => {
            log::debug!("No extension known for {}, using .{}", language.tag(), FALLBACK_EXTENSION);
            FALLBACK_EXTENSION.to_string()
        }
    }
}

pub fn export_file(
    buffer: &DocumentBuffer,
    language: Language,
    table: &impl ExtensionTable,
) -> ExportedFile {
    let ext = extension_for(language, table);
    ExportedFile {
        file_name: format!("{}.{}", EXPORT_STEM, ext),
        mime_type: EXPORT_MIME_TYPE,
        bytes: buffer.as_bytes().to_vec(),
    }
}

/// The host's "save this file" action.
pub trait FileSink {
    /// Deliver the file; returns where it ended up.
    fn deliver(&mut self, file: &ExportedFile) -> Result<PathBuf>;
}

/// Writes exported files into a directory, replacing any previous export.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download directory, or the working directory if there is none.
    pub fn downloads() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn deliver(&mut self, file: &ExportedFile) -> Result<PathBuf> {
        if file.file_name.contains(['/', '\\']) {
            return Err(AppError::Export(format!("invalid file name: {}", file.file_name)));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.file_name);
        fs::write(&path, &file.bytes)?;
        Ok(path)
    }
}
