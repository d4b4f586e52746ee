//! # Command Layer
//!
//! Maps terminal key events to [`CommandEvent`]s. Commands only suggest what
//! should happen; the controller applies the events to the ViewModel.
//!
//! Typed characters accumulate in a command line. Enter runs the line
//! through the [`LineCommandRegistry`], which turns it into [`UserAction`]s,
//! the same clicks and keystrokes a browser user would produce.

pub mod app;
pub mod line_commands;
pub mod line_editing;
pub mod search_keys;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::events::RouteName;
use crate::app::models::RouteParams;
use crate::app::view_models::ViewModel;
use crate::app::views::AccountSetting;

pub use app::AppTerminateCommand;
pub use line_commands::{LineCommand, LineCommandRegistry};
pub use line_editing::{BackspaceCommand, ClearLineCommand, ExecuteLineCommand, InsertCharCommand};
pub use search_keys::SuggestionNavigationCommand;

/// An interaction with the page, as a browser user would perform it
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Follow a link or nav entry
    Navigate { route: String, params: RouteParams },
    /// Type into the step-1 email input
    InputEmail(String),
    /// Click the step-1 "next" button
    SubmitEmail,
    InputPassword(String),
    InputConfirm(String),
    /// Click the step-2 login/register button
    SubmitCredentials,
    BackToEmail,
    Logout,
    CloseAnnouncement,
    ToggleTheme,
    /// Type into the header search input
    SearchInput(String),
    /// Key press on the header search input
    SearchKey(KeyCode),
    /// Click suggestion at this index
    PickSuggestion(usize),
    /// Click anywhere outside the search widget
    ClickOutside,
    /// Enter on the aggregate search page input
    GalSearch,
    /// Click a tile of the category grid
    OpenCategory(String),
    /// Buttons of the version row at this index on a detail page
    Download(usize),
    ReportInvalid(usize),
    Feedback(usize),
    /// Click the upload drop zone of a detail page
    UploadVersion,
    /// Send a comment from a detail page
    SendComment(String),
    /// Click an entry of the account menu
    AccountSetting(AccountSetting),
}

impl UserAction {
    pub fn navigate(route: impl Into<String>) -> Self {
        UserAction::Navigate {
            route: route.into(),
            params: RouteParams::new(),
        }
    }
}

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Append a character to the command line
    CharInsertRequested(char),
    /// Remove the last character of the command line
    CharDeleteRequested,
    /// Empty the command line
    LineClearRequested,
    /// Perform an interaction on the page
    ActionRequested(UserAction),
    /// The command line could not be understood
    UnknownCommand(String),
    QuitRequested,
}

/// Read-only view of the state commands decide on
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub route: RouteName,
    pub suggestions_open: bool,
    pub command_line: String,
}

impl CommandContext {
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            route: view_model.context().router.current().name.clone(),
            suggestions_open: view_model.search_box().is_visible(),
            command_line: view_model.command_line().to_string(),
        }
    }
}

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in `context`
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Type alias for the ordered command collection
type CommandCollection = Vec<Box<dyn Command>>;

/// Dispatches key events to the first relevant command
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let commands: CommandCollection = vec![
            Box::new(AppTerminateCommand),
            Box::new(SuggestionNavigationCommand),
            Box::new(ExecuteLineCommand::new()),
            Box::new(BackspaceCommand),
            Box::new(ClearLineCommand),
            Box::new(InsertCharCommand),
        ];
        Self { commands }
    }

    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("key {:?} handled by {}", event.code, command.name());
                return command.execute(event, context);
            }
        }
        Ok(vec![])
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
