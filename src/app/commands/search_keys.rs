//! # Suggestion Keyboard Navigation
//!
//! While the suggestion list is open, arrow keys belong to the search input.
//! Enter and Escape do too, unless a command is being typed.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, UserAction};

pub struct SuggestionNavigationCommand;

impl Command for SuggestionNavigationCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if !context.suggestions_open || event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match event.code {
            KeyCode::Up | KeyCode::Down => true,
            KeyCode::Enter | KeyCode::Esc => context.command_line.is_empty(),
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ActionRequested(UserAction::SearchKey(
            event.code,
        ))])
    }

    fn name(&self) -> &'static str {
        "SuggestionNavigation"
    }
}
