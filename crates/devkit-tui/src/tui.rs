use std::io::{
    self,
    Stdout,
};
use std::panic::{
    self,
    PanicHookInfo,
};
use std::sync::Arc;
use std::sync::mpsc::{
    self,
    Receiver,
};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self,
        Event,
        KeyEventKind,
        KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen,
        LeaveAlternateScreen,
        disable_raw_mode,
        enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use devkit_shortcuts::{
    Document,
    Platform,
    ShortcutDispatcher,
    ShortcutHandle,
};
use log::{
    error,
    info,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::{
    App,
    AppCommand,
};
use crate::input::handle_key;
use crate::settings::Settings;
use crate::shortcuts::build_registry;
use crate::ui::draw_ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Sends panic reports to the log while the alternate screen is up and puts
/// the previous hook back on drop.
pub struct PanicLogGuard {
    previous: Option<PanicHook>,
}

impl PanicLogGuard {
    pub fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| error!("{info}")));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicLogGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

pub fn run_tui(settings: &Settings, platform: Platform) -> Result<()> {
    let document = Arc::new(Document::new());
    let dispatcher = ShortcutDispatcher::new(document.clone(), platform);
    let (sender, receiver) = mpsc::channel();
    let registry = build_registry(platform, &settings.bindings, &sender)?;
    let handle = dispatcher.activate(registry, settings.shortcuts);

    info!(
        "Starting devkit with {} shortcuts on {}",
        handle.registry().len(),
        platform
    );

    let panic_guard = PanicLogGuard::install();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    } else if platform.is_mac() {
        info!("Terminal does not report the Command key; ⌘ shortcuts are unavailable");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, &document, &receiver, &handle);

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(panic_guard);
    dispatcher.deactivate();

    if let Err(err) = &res {
        error!("{:?}", err);
    }

    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, document: &Document,
    receiver: &Receiver<AppCommand>, handle: &ShortcutHandle,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, app, handle))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, document, &key);
        }

        for command in receiver.try_iter() {
            app.apply(command);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use super::*;

    fn crash(message: &str) {
        panic!("{message}");
    }

    #[test]
    fn test_panic_log_guard_restores_previous_hook() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let original = panic::take_hook();
        panic::set_hook(Box::new(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }));

        {
            let _guard = PanicLogGuard::install();
            let result = panic::catch_unwind(|| crash("tool crashed"));
            assert!(result.is_err());
            assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        }

        let result = panic::catch_unwind(|| crash("after the tui"));
        assert!(result.is_err());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);

        panic::set_hook(original);
    }
}
