use std::path::PathBuf;

use crate::app::controllers::popover::Popovers;
use crate::app::domain::messages::Message;
use crate::app::domain::preferences::{FontFamily, Preferences};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::storage::KeyValueStore;
use crate::app::services::export::{ExportedFile, ExtensionTable, FileSink, export_file};
use crate::app::services::highlight::{HighlightDispatcher, HighlightEngine, Markup};
use crate::app::session::EditorSession;

/// Font settings in the shape the editor widget's style takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    pub family: &'static str,
    pub size: u32,
}

impl From<(FontFamily, u32)> for FontStyle {
    fn from((family, size): (FontFamily, u32)) -> Self {
        Self {
            family: family.css_value(),
            size,
        }
    }
}

/// Everything the editor widget is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub markup: Markup,
    pub tab_size: u32,
    pub insert_spaces: bool,
    pub ignore_tab_key: bool,
    pub padding: u32,
    pub font: FontStyle,
}

impl EditorView {
    fn build(prefs: &Preferences, markup: Markup) -> Self {
        Self {
            markup,
            tab_size: prefs.tab_size,
            insert_spaces: prefs.insert_spaces,
            ignore_tab_key: prefs.ignore_tab_key,
            padding: prefs.padding,
            font: FontStyle::from((prefs.font_family, prefs.font_size)),
        }
    }
}

/// Main coordinator: owns the session, recomputes the view after every
/// mutation and performs saves.
pub struct EditorState<S, E, T> {
    session: EditorSession<S>,
    highlighter: HighlightDispatcher<E>,
    extensions: T,
    view: EditorView,
}

impl<S, E, T> EditorState<S, E, T>
where
    S: KeyValueStore,
    E: HighlightEngine,
    T: ExtensionTable,
{
    /// Load the session from `store` and compute the first view.
    pub fn new(store: S, engine: E, extensions: T) -> Self {
        let session = EditorSession::load(store);
        let highlighter = HighlightDispatcher::new(engine);
        let markup = highlighter.render(session.code(), session.language());
        let view = EditorView::build(session.preferences(), markup);

        Self {
            session,
            highlighter,
            extensions,
            view,
        }
    }

    pub fn session(&self) -> &EditorSession<S> {
        &self.session
    }

    pub fn view(&self) -> &EditorView {
        &self.view
    }

    pub fn popovers(&self) -> &Popovers {
        self.session.popovers()
    }

    /// Recompute the derived view from the current session.
    pub fn refresh(&mut self) {
        let markup = self
            .highlighter
            .render(self.session.code(), self.session.language());
        self.view = EditorView::build(self.session.preferences(), markup);
    }

    /// Apply one UI event.
    ///
    /// `Message::Save` changes nothing and returns the file for the host to
    /// deliver (or pass to [`EditorState::save`]'s sink); every other message
    /// returns `None`.
    pub fn handle(&mut self, msg: Message) -> Option<ExportedFile> {
        let s = &mut self.session;
        match msg {
            Message::Edit(code) => s.set_code(code),
            Message::Reset => s.reset(),
            Message::Save => return Some(self.export()),

            // Panel state doesn't affect the rendered editor.
            Message::TogglePanel(panel) => {
                s.popovers_mut().toggle(panel);
                return None;
            }
            Message::Click(target) => {
                s.popovers_mut().click(target);
                return None;
            }

            Message::SetTabSize(v) => s.set_tab_size(v),
            Message::TabSizeInput(raw) => {
                s.set_tab_size_input(&raw);
            }
            Message::ToggleInsertSpaces => {
                let v = !s.insert_spaces();
                s.set_insert_spaces(v);
            }
            Message::ToggleIgnoreTabKey => {
                let v = !s.ignore_tab_key();
                s.set_ignore_tab_key(v);
            }
            Message::SetPadding(v) => s.set_padding(v),
            Message::PaddingInput(raw) => {
                s.set_padding_input(&raw);
            }
            Message::SetLanguage(lang) => s.set_language(lang),
            Message::LanguageSelected(tag) => {
                s.set_language_tag(&tag);
            }

            Message::SetFontFamily(family) => s.set_font_family(family),
            Message::FontFamilySelected(value) => {
                s.set_font_family_value(&value);
            }
            Message::SetFontSize(v) => s.set_font_size(v),
            Message::FontSizeInput(raw) => {
                s.set_font_size_input(&raw);
            }
        }
        self.refresh();
        None
    }

    /// The file a save would produce right now.
    pub fn export(&self) -> ExportedFile {
        export_file(self.session.buffer(), self.session.language(), &self.extensions)
    }

    /// Export the buffer and hand it to `sink`.
    pub fn save(&self, sink: &mut impl FileSink) -> Result<PathBuf> {
        let file = self.export();
        match sink.deliver(&file) {
            Ok(path) => {
                log::info!(
                    "Saved {} ({} bytes) to {}",
                    file.file_name,
                    file.bytes.len(),
                    path.display()
                );
                Ok(path)
            }
            Err(e) => {
                log::warn!("Failed to save {}: {}", file.file_name, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controllers::popover::{ClickTarget, Panel};
    use crate::app::domain::preferences::Language;
    use crate::app::infrastructure::error::AppError;
    use crate::app::infrastructure::storage::MemoryStore;
    use crate::app::services::export::{BuiltinExtensionTable, DirectorySink};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    /// Tags the markup with the mode used; knows python only.
    #[derive(Default)]
    struct TagEngine {
        renders: Cell<usize>,
    }

    impl HighlightEngine for TagEngine {
        fn highlight_auto(&self, text: &str) -> Markup {
            self.renders.set(self.renders.get() + 1);
            Markup::new(format!("auto:{}", text))
        }

        fn highlight(&self, text: &str, language: &str) -> Result<Markup> {
            self.renders.set(self.renders.get() + 1);
            match language {
                "python" => Ok(Markup::new(format!("python:{}", text))),
                other => Err(AppError::UnknownLanguage(other.to_string())),
            }
        }
    }

    fn editor() -> EditorState<MemoryStore, TagEngine, BuiltinExtensionTable> {
        EditorState::new(MemoryStore::new(), TagEngine::default(), BuiltinExtensionTable)
    }

    struct FailingSink;

    impl FileSink for FailingSink {
        fn deliver(&mut self, _file: &ExportedFile) -> Result<PathBuf> {
            Err(AppError::Export("disk full".to_string()))
        }
    }

    #[test]
    fn test_initial_view_uses_defaults() {
        let ed = editor();
        let view = ed.view();
        assert!(view.markup.is_empty());
        assert_eq!(view.tab_size, 2);
        assert!(view.insert_spaces);
        assert!(!view.ignore_tab_key);
        assert_eq!(view.padding, 0);
        assert_eq!(view.font, FontStyle { family: "Fira Code", size: 14 });
    }

    #[test]
    fn test_edit_rerenders() {
        let mut ed = editor();
        ed.handle(Message::Edit("x = 1".to_string()));
        assert_eq!(ed.view().markup.as_str(), "auto:x = 1");

        ed.handle(Message::SetLanguage(Language::Python));
        assert_eq!(ed.view().markup.as_str(), "python:x = 1");

        // Engine rejects java: plain text for this pass.
        ed.handle(Message::LanguageSelected("java".to_string()));
        assert_eq!(ed.view().markup.as_str(), "x = 1");
    }

    #[test]
    fn test_format_and_font_messages_update_view() {
        let mut ed = editor();
        ed.handle(Message::TabSizeInput("4".to_string()));
        ed.handle(Message::ToggleInsertSpaces);
        ed.handle(Message::ToggleIgnoreTabKey);
        ed.handle(Message::PaddingInput("8".to_string()));
        ed.handle(Message::FontFamilySelected("Consolas, monaco, monospace".to_string()));
        ed.handle(Message::FontSizeInput("16".to_string()));

        let view = ed.view();
        assert_eq!(view.tab_size, 4);
        assert!(!view.insert_spaces);
        assert!(view.ignore_tab_key);
        assert_eq!(view.padding, 8);
        assert_eq!(view.font.family, "Consolas, monaco, monospace");
        assert_eq!(view.font.size, 16);
    }

    #[test]
    fn test_bad_input_leaves_view_unchanged() {
        let mut ed = editor();
        ed.handle(Message::SetTabSize(3));
        ed.handle(Message::TabSizeInput("three".to_string()));
        ed.handle(Message::FontSizeInput("".to_string()));
        assert_eq!(ed.view().tab_size, 3);
        assert_eq!(ed.view().font.size, 14);
    }

    #[test]
    fn test_panel_messages_skip_render() {
        let mut ed = editor();
        ed.handle(Message::Edit("x".to_string()));
        let renders = ed.highlighter.engine().renders.get();

        ed.handle(Message::TogglePanel(Panel::Format));
        ed.handle(Message::Click(ClickTarget::Inside(Panel::Format)));
        ed.handle(Message::TogglePanel(Panel::Font));
        assert!(ed.popovers().format_open());
        assert!(ed.popovers().font_open());

        ed.handle(Message::Click(ClickTarget::Outside));
        assert!(!ed.popovers().format_open());
        assert!(!ed.popovers().font_open());
        assert_eq!(ed.highlighter.engine().renders.get(), renders);
    }

    #[test]
    fn test_reset_scenario() {
        let mut ed = editor();
        ed.handle(Message::SetTabSize(8));
        ed.handle(Message::SetFontSize(20));
        ed.handle(Message::SetLanguage(Language::Python));
        ed.handle(Message::Edit("x=1".to_string()));

        ed.handle(Message::Reset);

        assert_eq!(ed.session().tab_size(), 2);
        assert_eq!(ed.session().language(), Language::Auto);
        assert_eq!(ed.session().code(), "");
        assert_eq!(ed.session().font_size(), 20);
        assert!(ed.view().markup.is_empty());
        assert_eq!(ed.view().font.size, 20);
    }

    #[test]
    fn test_view_restored_after_restart() {
        let mut ed = editor();
        ed.handle(Message::SetLanguage(Language::Python));
        ed.handle(Message::Edit("print(1)".to_string()));
        let store = ed.session.into_store();

        let restarted = EditorState::new(store, TagEngine::default(), BuiltinExtensionTable);
        assert_eq!(restarted.view().markup.as_str(), "python:print(1)");
    }

    #[test]
    fn test_export_names() {
        let mut ed = editor();
        ed.handle(Message::Edit("x = 1".to_string()));
        assert_eq!(ed.export().file_name, "myCode.txt");

        ed.handle(Message::SetLanguage(Language::Python));
        let file = ed.export();
        assert_eq!(file.file_name, "myCode.py");
        assert_eq!(file.bytes, b"x = 1".to_vec());
    }

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let mut ed = editor();
        ed.handle(Message::SetLanguage(Language::Css));
        ed.handle(Message::Edit("a { color: red; }".to_string()));

        let path = ed.save(&mut sink).unwrap();
        assert_eq!(path.file_name().unwrap(), "myCode.css");
        assert_eq!(fs::read_to_string(path).unwrap(), "a { color: red; }");
    }

    #[test]
    fn test_save_failure_keeps_session() {
        let mut ed = editor();
        ed.handle(Message::Edit("keep me".to_string()));
        assert!(ed.save(&mut FailingSink).is_err());
        assert_eq!(ed.session().code(), "keep me");
    }

    #[test]
    fn test_save_message_returns_export() {
        let mut ed = editor();
        assert!(ed.handle(Message::Edit("x = 1".to_string())).is_none());
        ed.handle(Message::SetLanguage(Language::Python));
        let renders = ed.highlighter.engine().renders.get();

        let file = ed.handle(Message::Save).expect("save yields a file");
        assert_eq!(file.file_name, "myCode.py");
        assert_eq!(file.bytes, b"x = 1".to_vec());
        assert_eq!(file.mime_type, "text/plain");

        // Saving neither mutates nor re-renders.
        assert_eq!(ed.session().code(), "x = 1");
        assert_eq!(ed.highlighter.engine().renders.get(), renders);
    }
}
