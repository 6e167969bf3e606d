//! Declarative builder for footer shortcuts

use super::Shortcut;

/// Builder for shortcut lists with the common groups pre-packaged
#[derive(Default)]
pub struct ShortcutsBuilder {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row movement
    pub fn with_navigation(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("j/k", "Up/Down"));
        self
    }

    /// Page stepping and page size
    pub fn with_paging(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("[/]", "Prev/Next"));
        self.shortcuts.push(Shortcut::new("{/}", "First/Last"));
        self.shortcuts.push(Shortcut::new("z", "Page Size"));
        self
    }

    /// Column focus, sorting and visibility
    pub fn with_columns(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("h/l", "Column"));
        self.shortcuts.push(Shortcut::new("s/S", "Sort Asc/Desc"));
        self.shortcuts.push(Shortcut::new("v/V", "Hide/Show All"));
        self
    }

    pub fn with_search(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("/", "Search"));
        self
    }

    pub fn with_quit(mut self) -> Self {
        self.shortcuts.push(Shortcut::new("q", "Quit"));
        self
    }

    /// Add a single custom shortcut
    pub fn add(mut self, key: &str, description: &str) -> Self {
        self.shortcuts.push(Shortcut::new(key, description));
        self
    }

    pub fn build(self) -> Vec<Shortcut> {
        self.shortcuts
    }
}
