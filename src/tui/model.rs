//! Browser model types for testable state management
//!
//! Separates raw UI state (`UiState`), the actions keys map to
//! (`ScreenAction`) and the computed view model (`BrowserViewModel`), so the
//! whole screen can be exercised without a terminal.

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::list::{ActionEntry, PageStep, PaginationView, TableViewModel};
use crate::tui::components::footer::{
    Shortcut, confirm_shortcuts, detail_shortcuts, menu_shortcuts, search_shortcuts,
    table_shortcuts,
};
use crate::tui::components::toast::Toast;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Table,
    Search,
    Menu,
    Confirm,
    Detail,
}

/// Everything a key can ask the screen to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    // Rows
    MoveUp,
    MoveDown,

    // Search
    FocusSearch,
    SearchInput(char),
    SearchBackspace,
    /// Leave the search line, keeping the term
    ExitSearch,
    ClearSearchAndExit,

    // Columns
    FocusPrevColumn,
    FocusNextColumn,
    SortAscending,
    SortDescending,
    ToggleColumn,
    ShowAllColumns,

    // Pagination
    Page(PageStep),
    CyclePageSize,

    // Row actions
    OpenMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    ConfirmYes,
    CloseOverlay,
    Create,

    // App
    Reload,
    Quit,
}

/// Map a key press to an action for the current mode
pub fn key_to_action(mode: InputMode, code: KeyCode, modifiers: KeyModifiers) -> Option<ScreenAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(ScreenAction::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Table => table_key(code),
        InputMode::Search => match code {
            KeyCode::Char(c) => Some(ScreenAction::SearchInput(c)),
            KeyCode::Backspace => Some(ScreenAction::SearchBackspace),
            KeyCode::Enter | KeyCode::Tab => Some(ScreenAction::ExitSearch),
            KeyCode::Esc => Some(ScreenAction::ClearSearchAndExit),
            _ => None,
        },
        InputMode::Menu => match code {
            KeyCode::Char('j') | KeyCode::Down => Some(ScreenAction::MenuDown),
            KeyCode::Char('k') | KeyCode::Up => Some(ScreenAction::MenuUp),
            KeyCode::Enter => Some(ScreenAction::MenuSelect),
            KeyCode::Esc | KeyCode::Char('q') => Some(ScreenAction::CloseOverlay),
            _ => None,
        },
        InputMode::Confirm => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ScreenAction::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
                Some(ScreenAction::CloseOverlay)
            }
            _ => None,
        },
        InputMode::Detail => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(ScreenAction::CloseOverlay),
            _ => None,
        },
    }
}

fn table_key(code: KeyCode) -> Option<ScreenAction> {
    let action = match code {
        KeyCode::Char('j') | KeyCode::Down => ScreenAction::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => ScreenAction::MoveUp,
        KeyCode::Char('/') => ScreenAction::FocusSearch,
        KeyCode::Char('h') | KeyCode::Left => ScreenAction::FocusPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => ScreenAction::FocusNextColumn,
        KeyCode::Char('s') => ScreenAction::SortAscending,
        KeyCode::Char('S') => ScreenAction::SortDescending,
        KeyCode::Char('v') => ScreenAction::ToggleColumn,
        KeyCode::Char('V') => ScreenAction::ShowAllColumns,
        KeyCode::Char('[') | KeyCode::PageUp => ScreenAction::Page(PageStep::Prev),
        KeyCode::Char(']') | KeyCode::PageDown => ScreenAction::Page(PageStep::Next),
        KeyCode::Char('{') | KeyCode::Home => ScreenAction::Page(PageStep::First),
        KeyCode::Char('}') | KeyCode::End => ScreenAction::Page(PageStep::Last),
        KeyCode::Char('z') => ScreenAction::CyclePageSize,
        KeyCode::Char('r') => ScreenAction::Reload,
        KeyCode::Enter => ScreenAction::OpenMenu,
        KeyCode::Char('n') => ScreenAction::Create,
        KeyCode::Char('q') => ScreenAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Row action menu opened with Enter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Id of the row the menu acts on, fixed when the menu opens
    pub row_id: String,
    /// Label of the row the menu acts on
    pub row_label: String,
    pub entries: Vec<ActionEntry>,
    pub selected: usize,
}

impl MenuState {
    pub fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn current(&self) -> Option<&ActionEntry> {
        self.entries.get(self.selected)
    }
}

/// Pending delete waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub id: String,
    pub label: String,
}

/// Field list shown by the inspect action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

/// At most one modal is open at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Menu(MenuState),
    Confirm(ConfirmState),
    Detail(DetailState),
}

/// Raw UI state that is not part of the list contract
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Index of the selected row on the current page
    pub selected: usize,
    /// Index into the visible columns
    pub focused_column: usize,
    pub search_focused: bool,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub should_exit: bool,
}

impl UiState {
    pub fn mode(&self) -> InputMode {
        match self.overlay {
            Overlay::Menu(_) => InputMode::Menu,
            Overlay::Confirm(_) => InputMode::Confirm,
            Overlay::Detail(_) => InputMode::Detail,
            Overlay::None if self.search_focused => InputMode::Search,
            Overlay::None => InputMode::Table,
        }
    }

    /// Keep the selection on an existing row after the row count changed
    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
    }

    pub fn clamp_focus(&mut self, column_count: usize) {
        self.focused_column = self.focused_column.min(column_count.saturating_sub(1));
    }
}

/// Pure function: move a selection by one, staying inside `0..count`
pub fn step_selection(selected: usize, down: bool, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    if down {
        (selected + 1).min(count - 1)
    } else {
        selected.saturating_sub(1)
    }
}

/// First row to draw so that `selected` fits in `visible` lines
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    (selected + 1).saturating_sub(visible)
}

/// Search line state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewModel {
    pub query: String,
    pub is_focused: bool,
    pub is_settling: bool,
}

/// Computed view model for one render of the browser
#[derive(Debug, Clone)]
pub struct BrowserViewModel {
    pub title: String,
    pub subtitle: Option<String>,
    pub search: SearchViewModel,
    pub table: TableViewModel,
    /// Rows matching the applied query; unknown until the first load
    pub total: Option<u64>,
    /// Key of the focused column, if any column is visible
    pub focused_column: Option<&'static str>,
    pub hidden_columns: usize,
    /// First row drawn
    pub scroll_offset: usize,
    pub pagination: PaginationView,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub shortcuts: Vec<Shortcut>,
    /// A row action is waiting on its target fetch
    pub busy: bool,
}

/// Footer shortcuts for a mode
pub fn shortcuts_for(mode: InputMode) -> Vec<Shortcut> {
    match mode {
        InputMode::Table => table_shortcuts(),
        InputMode::Search => search_shortcuts(),
        InputMode::Menu => menu_shortcuts(),
        InputMode::Confirm => confirm_shortcuts(),
        InputMode::Detail => detail_shortcuts(),
    }
}
