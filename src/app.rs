use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui_interact::components::InputState;

use crate::editor::LaunchError;
use crate::matcher::fuzzy_match;

/// Actions that the event loop should take after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Open this candidate (relative to the notes root) in the editor.
    Open(String),
}

/// The search text, built one character at a time.
///
/// Only ever appended to or trimmed from the end, so the input cursor always
/// sits after the last character.
pub struct Query {
    input: InputState,
}

impl Query {
    pub fn new() -> Self {
        Self {
            input: InputState::empty(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.input.text()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.input.insert_char(c);
    }

    /// Remove and return the last character, or `None` if the query is empty.
    pub fn pop(&mut self) -> Option<char> {
        let last = self.as_str().chars().next_back()?;
        self.input.delete_char_backward();
        Some(last)
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of the catalog entries matching `query`, in catalog order.
///
/// Always a full pass over the catalog; an empty result is a valid view.
pub fn refilter(catalog: &[String], query: &str) -> Vec<usize> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, name)| fuzzy_match(name, query))
        .map(|(i, _)| i)
        .collect()
}

/// Main application state, owned by the event loop.
pub struct App {
    /// Directory the catalog was scanned from.
    pub root: PathBuf,

    /// Every note found at startup. Never modified.
    catalog: Vec<String>,

    query: Query,

    /// Catalog indices of the entries matching `query`.
    filtered: Vec<usize>,

    /// Index into `filtered` of the highlighted row.
    selection: usize,

    /// Rows available for listing candidates.
    viewport: usize,

    /// Last error to show at the end of the query line, cleared on the next key.
    pub status: Option<String>,
}

impl App {
    pub fn new(root: impl Into<PathBuf>, catalog: Vec<String>) -> Self {
        let filtered = (0..catalog.len()).collect();
        Self {
            root: root.into(),
            catalog,
            query: Query::default(),
            filtered,
            selection: 0,
            viewport: usize::MAX,
            status: None,
        }
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    #[cfg(test)]
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The matching candidates, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &str> + '_ {
        self.filtered.iter().map(|&i| self.catalog[i].as_str())
    }

    /// The candidates that fit in the viewport.
    pub fn visible(&self) -> impl Iterator<Item = &str> + '_ {
        self.filtered().take(self.viewport)
    }

    /// The highlighted candidate, if the filtered list isn't empty.
    pub fn selected(&self) -> Option<&str> {
        self.filtered
            .get(self.selection)
            .map(|&i| self.catalog[i].as_str())
    }

    /// Highest index the cursor may take for the current list and viewport.
    fn max_selection(&self) -> usize {
        self.filtered.len().min(self.viewport).saturating_sub(1)
    }

    /// Record how many candidate rows fit on screen and pull the cursor back
    /// inside them.
    pub fn set_viewport(&mut self, rows: usize) {
        if rows != self.viewport {
            tracing::debug!(rows, "viewport changed");
        }
        self.viewport = rows;
        self.selection = self.selection.min(self.max_selection());
    }

    fn refilter(&mut self) {
        self.filtered = refilter(&self.catalog, self.query.as_str());
        self.selection = 0;
    }

    pub fn type_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    /// Drop the last query character. Nothing changes when the query is
    /// already empty.
    pub fn erase_last(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Empty the query. Nothing changes when it is already empty.
    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
        }
    }

    pub fn move_up(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.selection = (self.selection + 1).min(self.max_selection());
    }

    /// The action for the confirm key: open the highlighted candidate, or
    /// nothing when no candidate matches.
    pub fn confirm(&self) -> Action {
        match self.selected() {
            Some(name) => Action::Open(name.to_string()),
            None => Action::None,
        }
    }

    /// Show an editor failure on the query line instead of aborting.
    pub fn report_launch_error(&mut self, err: &LaunchError) {
        tracing::warn!(error = %err, "editor launch failed");
        self.status = Some(err.to_string());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.status = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('w') if ctrl => {
                self.clear_query();
                Action::None
            }
            KeyCode::Esc => {
                self.clear_query();
                Action::None
            }
            KeyCode::Backspace => {
                self.erase_last();
                Action::None
            }
            KeyCode::Up => {
                self.move_up();
                Action::None
            }
            KeyCode::Down => {
                self.move_down();
                Action::None
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Char(c) if !ctrl && !alt => {
                self.type_char(c);
                Action::None
            }
            _ => Action::None,
        }
    }
}
