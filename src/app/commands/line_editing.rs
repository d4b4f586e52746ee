//! # Command Line Editing
//!
//! Character insertion, deletion and execution of the typed command line.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::line_commands::LineCommandRegistry;
use super::{Command, CommandContext, CommandEvent};

/// Append a typed character
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char(_))
            && !event.modifiers.contains(KeyModifiers::CONTROL)
            && !event.modifiers.contains(KeyModifiers::ALT)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if let KeyCode::Char(ch) = event.code {
            Ok(vec![CommandEvent::CharInsertRequested(ch)])
        } else {
            Ok(vec![])
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Backspace)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.command_line.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![CommandEvent::CharDeleteRequested])
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Escape with no suggestion list open discards the typed line
pub struct ClearLineCommand;

impl Command for ClearLineCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::LineClearRequested])
    }

    fn name(&self) -> &'static str {
        "ClearLine"
    }
}

/// Run the typed line through the line command registry (Enter)
pub struct ExecuteLineCommand {
    registry: LineCommandRegistry,
}

impl ExecuteLineCommand {
    pub fn new() -> Self {
        Self {
            registry: LineCommandRegistry::new(),
        }
    }
}

impl Default for ExecuteLineCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ExecuteLineCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let line = context.command_line.trim();
        if line.is_empty() {
            return Ok(vec![]);
        }

        let mut events = vec![CommandEvent::LineClearRequested];
        match self.registry.execute_command(line) {
            Ok(parsed) => events.extend(parsed),
            Err(e) => {
                tracing::debug!("line command '{}' rejected: {}", line, e);
                events.push(CommandEvent::UnknownCommand(e.to_string()));
            }
        }
        Ok(events)
    }

    fn name(&self) -> &'static str {
        "ExecuteLine"
    }
}
