use std::ffi::OsString;

use crate::app::events::Theme;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Storage file for persisted preferences. Defaults to
    /// $NIYPHER_STORAGE_PATH or ~/.niypher/storage.json.
    #[clap(short = 's', long, help = "storage file path")]
    storage: Option<String>,

    /// Force a colour theme for this session; it is not persisted.
    #[clap(short = 't', long, value_parser = parse_theme, help = "light or dark")]
    theme: Option<Theme>,

    /// Route shown on start-up.
    #[clap(long, default_value = "home", help = "initial route")]
    start: String,

    #[clap(short = 'v', long, help = "log at debug level")]
    verbose: bool,
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse::<Theme>().map_err(|e| e.to_string())
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    storage: Option<String>,
    theme: Option<Theme>,
    start: String,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            storage: args.storage,
            theme: args.theme,
            start: args.start,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn storage(&self) -> Option<&str> {
        self.storage.as_deref()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.storage(), None);
        assert_eq!(args.theme(), None);
        assert_eq!(args.start(), "home");
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_long_flags() {
        let args = CommandLineArgs::parse_from([
            "program",
            "--storage",
            "/tmp/s.json",
            "--theme",
            "dark",
            "--start",
            "profile",
            "--verbose",
        ]);
        assert_eq!(args.storage(), Some("/tmp/s.json"));
        assert_eq!(args.theme(), Some(Theme::Dark));
        assert_eq!(args.start(), "profile");
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-t", "light", "-v"]);
        assert_eq!(args.theme(), Some(Theme::Light));
        assert!(args.verbose());
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let result = ClapArgs::try_parse_from(["program", "--theme", "sepia"]);
        assert!(result.is_err());
    }
}
