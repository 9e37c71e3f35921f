use std::path::PathBuf;

use clap::Parser;
use devkit_shortcuts::Platform;

#[derive(Parser, Debug)]
#[command(name = "devkit")]
#[command(about = "devkit - browse developer tools from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        help = "Path to the settings file (JSON)",
        value_name = "PATH"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Override platform detection (mac, windows, unknown)",
        value_name = "PLATFORM"
    )]
    pub platform: Option<Platform>,

    #[arg(long, help = "Trace every key event and shortcut match")]
    pub debug_shortcuts: bool,

    #[arg(long, help = "Set the global log level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[arg(long, help = "Write logs to this file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'l', long, help = "Print the active shortcuts and exit")]
    pub list: bool,
}

impl Cli {
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(level) = self.log_level.as_deref()
            && level.parse::<log::LevelFilter>().is_err()
        {
            return Err(format!("Invalid log level: {level}"));
        }

        if self.log_level.is_some() && self.log_file.is_none() && !self.list {
            return Err(
                "--log-level needs --log-file while the terminal UI is running".to_string(),
            );
        }

        self.check_debug_output(self.debug_shortcuts, "--debug-shortcuts")
    }

    /// Shortcut traces go through the logger, which is off in the terminal UI
    /// unless a log file is given.
    pub fn check_debug_output(&self, debug: bool, source: &str) -> Result<(), String> {
        if debug && self.log_file.is_none() && !self.list {
            return Err(format!(
                "{source} needs --log-file while the terminal UI is running"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_override() {
        let cli = Cli::try_parse_from(["devkit", "--platform", "mac", "--list"]).unwrap();

        assert_eq!(cli.platform(), Platform::Mac);
        assert!(cli.list);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_invalid_platform_is_rejected() {
        assert!(Cli::try_parse_from(["devkit", "--platform", "beos"]).is_err());
    }

    #[test]
    fn test_default_platform_is_detected() {
        let cli = Cli::try_parse_from(["devkit"]).unwrap();

        assert_eq!(cli.platform(), Platform::current());
        assert!(!cli.debug_shortcuts);
    }

    #[test]
    fn test_log_level_requires_log_file_for_tui() {
        let cli = Cli::try_parse_from(["devkit", "--log-level", "debug"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from([
            "devkit",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/devkit.log",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_debug_shortcuts_requires_log_file_for_tui() {
        let cli = Cli::try_parse_from(["devkit", "--debug-shortcuts"]).unwrap();
        assert_eq!(
            cli.validate().unwrap_err(),
            "--debug-shortcuts needs --log-file while the terminal UI is running".to_string()
        );

        let cli = Cli::try_parse_from([
            "devkit",
            "--debug-shortcuts",
            "--log-file",
            "/tmp/devkit.log",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());

        let cli = Cli::try_parse_from(["devkit", "--debug-shortcuts", "--list"]).unwrap();
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_debug_from_settings_requires_log_file() {
        let cli = Cli::try_parse_from(["devkit"]).unwrap();

        assert!(cli.check_debug_output(false, "shortcuts.debug").is_ok());
        assert!(
            cli.check_debug_output(true, "shortcuts.debug")
                .unwrap_err()
                .starts_with("shortcuts.debug needs --log-file")
        );
    }

    #[test]
    fn test_invalid_log_level() {
        let cli = Cli::try_parse_from(["devkit", "--log-level", "loud", "--list"]).unwrap();

        assert_eq!(
            cli.validate().unwrap_err(),
            "Invalid log level: loud".to_string()
        );
    }
}
