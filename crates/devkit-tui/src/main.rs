mod app;
mod cli;
mod clipboard;
mod input;
mod logging;
mod settings;
mod shortcuts;
mod tools;
mod tui;
mod ui;

use std::io::Write;
use std::sync::mpsc;

use anyhow::{
    Result,
    bail,
};
use clap::Parser;
use devkit_shortcuts::{
    Platform,
    ShortcutParser,
    ShortcutRegistry,
};

use crate::cli::Cli;
use crate::logging::{
    LogConfig,
    parse_level,
    select_initializer,
};
use crate::settings::Settings;
use crate::shortcuts::build_registry;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        bail!(message);
    }

    let mut log_config = match cli.log_level.as_deref() {
        Some(level) => LogConfig::new(parse_level(level)),
        None if cli.debug_shortcuts => LogConfig::new(log::LevelFilter::Debug),
        None => LogConfig::default(),
    };
    if let Some(path) = cli.log_file.clone() {
        log_config = log_config.with_file_output(path);
    }
    select_initializer(&log_config, !cli.list).initialize(&log_config)?;

    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    if cli.debug_shortcuts {
        settings.shortcuts.debug = true;
    }
    if let Err(message) = cli.check_debug_output(settings.shortcuts.debug, "shortcuts.debug") {
        bail!(message);
    }

    let platform = cli.platform();

    if cli.list {
        let (sender, _receiver) = mpsc::channel();
        let registry = build_registry(platform, &settings.bindings, &sender)?;
        return print_shortcuts(&mut std::io::stdout(), &registry, platform);
    }

    tui::run_tui(&settings, platform)
}

fn print_shortcuts(
    out: &mut impl Write, registry: &ShortcutRegistry, platform: Platform,
) -> Result<()> {
    let parser = ShortcutParser::new(platform);

    writeln!(out, "Shortcuts ({platform})")?;
    for (category, definitions) in registry.grouped() {
        writeln!(out)?;
        writeln!(out, "{category}")?;
        for definition in definitions {
            let scope = if definition.allow_in_inputs {
                ""
            } else {
                "  (not in text fields)"
            };
            writeln!(
                out,
                "  {:<14} {}{}",
                parser.format(definition),
                definition.description,
                scope
            )?;
        }
    }

    Ok(())
}
