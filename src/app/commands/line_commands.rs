//! # Line Commands
//!
//! Parses a typed command line such as `go profile` or `pwd Secret#1` into
//! the page interactions it stands for.

use anyhow::{anyhow, Result};

use super::{CommandEvent, UserAction};
use crate::app::models::detail_params;
use crate::app::views::AccountSetting;

/// Trait for line commands
pub trait LineCommand: Send + Sync {
    /// Whether this command owns `verb`
    fn can_handle(&self, verb: &str) -> bool;

    /// Produce events for `verb` with the rest of the line as `args`
    fn execute(&self, verb: &str, args: &str) -> Result<Vec<CommandEvent>>;

    fn name(&self) -> &'static str;
}

fn action(action: UserAction) -> Vec<CommandEvent> {
    vec![CommandEvent::ActionRequested(action)]
}

/// Rows and suggestions are numbered from 1 on screen
fn one_based(args: &str, usage: &str) -> Result<usize> {
    let n: usize = args.trim().parse().map_err(|_| anyhow!("usage: {usage}"))?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("{usage}: numbering starts at 1"))
}

/// `go <route>` and `detail <id>`
pub struct NavigateCommand;

impl LineCommand for NavigateCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "go" | "detail")
    }

    fn execute(&self, verb: &str, args: &str) -> Result<Vec<CommandEvent>> {
        let target = args.trim();
        if target.is_empty() {
            return Err(anyhow!("usage: {verb} <{}>", if verb == "go" { "route" } else { "id" }));
        }
        if verb == "go" {
            return Ok(action(UserAction::navigate(target)));
        }
        let id: u32 = target
            .parse()
            .map_err(|_| anyhow!("invalid content id '{target}'"))?;
        Ok(action(UserAction::Navigate {
            route: "detail".to_string(),
            params: detail_params(id),
        }))
    }

    fn name(&self) -> &'static str {
        "NavigateCommand"
    }
}

/// `email <addr>`, `pwd <text>` and `confirm <text>` type into the auth card
pub struct AuthInputCommand;

impl LineCommand for AuthInputCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "email" | "pwd" | "confirm")
    }

    fn execute(&self, verb: &str, args: &str) -> Result<Vec<CommandEvent>> {
        let text = args.to_string();
        Ok(action(match verb {
            "email" => UserAction::InputEmail(text),
            "pwd" => UserAction::InputPassword(text),
            _ => UserAction::InputConfirm(text),
        }))
    }

    fn name(&self) -> &'static str {
        "AuthInputCommand"
    }
}

/// Buttons of the auth and account cards
pub struct AuthButtonCommand;

impl LineCommand for AuthButtonCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "next" | "submit" | "back" | "logout")
    }

    fn execute(&self, verb: &str, _args: &str) -> Result<Vec<CommandEvent>> {
        Ok(action(match verb {
            "next" => UserAction::SubmitEmail,
            "submit" => UserAction::SubmitCredentials,
            "back" => UserAction::BackToEmail,
            _ => UserAction::Logout,
        }))
    }

    fn name(&self) -> &'static str {
        "AuthButtonCommand"
    }
}

/// Header search and the aggregate search box
pub struct SearchCommand;

impl LineCommand for SearchCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "search" | "pick" | "outside" | "gal")
    }

    fn execute(&self, verb: &str, args: &str) -> Result<Vec<CommandEvent>> {
        match verb {
            "search" => Ok(action(UserAction::SearchInput(args.to_string()))),
            "pick" => Ok(action(UserAction::PickSuggestion(one_based(
                args,
                "pick <n>",
            )?))),
            "outside" => Ok(action(UserAction::ClickOutside)),
            _ => Ok(action(UserAction::GalSearch)),
        }
    }

    fn name(&self) -> &'static str {
        "SearchCommand"
    }
}

/// `close` (announcement) and `theme`
pub struct PageControlCommand;

impl LineCommand for PageControlCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "close" | "theme")
    }

    fn execute(&self, verb: &str, _args: &str) -> Result<Vec<CommandEvent>> {
        Ok(action(if verb == "close" {
            UserAction::CloseAnnouncement
        } else {
            UserAction::ToggleTheme
        }))
    }

    fn name(&self) -> &'static str {
        "PageControlCommand"
    }
}

/// Category tiles, detail page buttons and the account menu
pub struct PageButtonCommand;

impl LineCommand for PageButtonCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(
            verb,
            "cat" | "download" | "report" | "feedback" | "upload" | "comment" | "account"
        )
    }

    fn execute(&self, verb: &str, args: &str) -> Result<Vec<CommandEvent>> {
        Ok(action(match verb {
            "cat" => UserAction::OpenCategory(args.trim().to_string()),
            "download" => UserAction::Download(one_based(args, "download <n>")?),
            "report" => UserAction::ReportInvalid(one_based(args, "report <n>")?),
            "feedback" => UserAction::Feedback(one_based(args, "feedback <n>")?),
            "upload" => UserAction::UploadVersion,
            "comment" => UserAction::SendComment(args.to_string()),
            _ => UserAction::AccountSetting(args.trim().parse::<AccountSetting>()?),
        }))
    }

    fn name(&self) -> &'static str {
        "PageButtonCommand"
    }
}

pub struct QuitCommand;

impl LineCommand for QuitCommand {
    fn can_handle(&self, verb: &str) -> bool {
        matches!(verb, "quit" | "q")
    }

    fn execute(&self, _verb: &str, _args: &str) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "QuitCommand"
    }
}

/// Registry of line commands
pub struct LineCommandRegistry {
    commands: Vec<Box<dyn LineCommand>>,
}

impl LineCommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: vec![
                Box::new(NavigateCommand),
                Box::new(AuthInputCommand),
                Box::new(AuthButtonCommand),
                Box::new(SearchCommand),
                Box::new(PageControlCommand),
                Box::new(PageButtonCommand),
                Box::new(QuitCommand),
            ],
        }
    }

    /// Split off the verb and hand the rest of the line to its command.
    /// Arguments keep inner spaces so passwords may contain them.
    pub fn execute_command(&self, line: &str) -> Result<Vec<CommandEvent>> {
        let line = line.trim_start();
        let (verb, args) = match line.split_once(' ') {
            Some((verb, args)) => (verb, args),
            None => (line, ""),
        };

        for command in &self.commands {
            if command.can_handle(verb) {
                tracing::debug!("line command '{}' handled by {}", verb, command.name());
                return command.execute(verb, args);
            }
        }
        Err(anyhow!("未知命令: {verb}"))
    }
}

impl Default for LineCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
