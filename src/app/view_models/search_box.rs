//! # Search Box
//!
//! State of the header search input and its suggestion list: debounced
//! input, keyboard selection, committing a suggestion and dismissal.

use crate::app::models::ContentCatalog;
use crate::app::services::{SearchSuggestionEngine, Suggestions};
use crossterm::event::KeyCode;
use std::sync::Arc;

/// Result of a key press on the search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKeyOutcome {
    /// Key ignored in the current state
    Ignored,
    /// Selection or visibility changed
    Updated,
    /// A search for this text should run
    Search(String),
}

#[derive(Debug)]
pub struct SearchBox {
    input: String,
    suggestions: Suggestions,
    selected: Option<usize>,
    visible: bool,
    generation: u64,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            suggestions: Arc::from(Vec::new()),
            selected: None,
            visible: false,
            generation: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the input text; returns the generation a debounce must match
    pub fn set_input(&mut self, text: &str) -> u64 {
        self.input = text.to_string();
        self.generation += 1;
        self.generation
    }

    /// Debounce elapsed: compute suggestions unless newer input arrived
    pub fn on_debounce(
        &mut self,
        generation: u64,
        engine: &mut SearchSuggestionEngine,
        catalog: &ContentCatalog,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        let query = self.input.trim();
        if query.is_empty() {
            self.clear();
            return true;
        }
        let suggestions = engine.suggestions(catalog, query);
        self.selected = None;
        self.visible = !suggestions.is_empty();
        self.suggestions = suggestions;
        true
    }

    pub fn handle_key(&mut self, code: KeyCode) -> SearchKeyOutcome {
        match code {
            KeyCode::Down => {
                if !self.visible || self.suggestions.is_empty() {
                    return SearchKeyOutcome::Ignored;
                }
                let last = self.suggestions.len() - 1;
                self.selected = Some(match self.selected {
                    None => 0,
                    Some(index) => (index + 1).min(last),
                });
                SearchKeyOutcome::Updated
            }
            KeyCode::Up => match self.selected {
                Some(_) if !self.visible => SearchKeyOutcome::Ignored,
                Some(0) => {
                    self.selected = None;
                    SearchKeyOutcome::Updated
                }
                Some(index) => {
                    self.selected = Some(index - 1);
                    SearchKeyOutcome::Updated
                }
                None => SearchKeyOutcome::Ignored,
            },
            KeyCode::Enter => match self.selected.filter(|i| *i < self.suggestions.len()) {
                Some(index) => self
                    .select(index)
                    .map_or(SearchKeyOutcome::Ignored, SearchKeyOutcome::Search),
                None => SearchKeyOutcome::Search(self.input.clone()),
            },
            KeyCode::Esc => {
                self.clear();
                SearchKeyOutcome::Updated
            }
            _ => SearchKeyOutcome::Ignored,
        }
    }

    /// Commit suggestion `index`: fill the input and close the list
    pub fn select(&mut self, index: usize) -> Option<String> {
        let text = self.suggestions.get(index)?.text.clone();
        self.input = text.clone();
        self.clear();
        Some(text)
    }

    /// A click landed outside the search widget
    pub fn click_outside(&mut self) -> bool {
        let was_visible = self.visible;
        self.clear();
        was_visible
    }

    pub fn clear(&mut self) {
        self.suggestions = Arc::from(Vec::new());
        self.selected = None;
        self.visible = false;
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}
