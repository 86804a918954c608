use super::preferences::{FontFamily, Language};
use crate::app::controllers::popover::{ClickTarget, Panel};

/// All UI events the editor reacts to.
/// The host turns each widget callback into one of these; `EditorState::handle`
/// applies it and recomputes the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editor widget
    Edit(String),

    // Toolbar
    Save,
    Reset,
    TogglePanel(Panel),
    Click(ClickTarget),

    // Format panel
    SetTabSize(u32),
    TabSizeInput(String),
    ToggleInsertSpaces,
    ToggleIgnoreTabKey,
    SetPadding(u32),
    PaddingInput(String),
    SetLanguage(Language),
    LanguageSelected(String),

    // Font panel
    SetFontFamily(FontFamily),
    FontFamilySelected(String),
    SetFontSize(u32),
    FontSizeInput(String),
}
