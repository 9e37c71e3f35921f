use crossterm::event::{
    KeyCode,
    KeyEvent as TerminalKeyEvent,
    KeyModifiers,
};
use devkit_shortcuts::{
    Document,
    FocusTarget,
    KeyEvent,
};

use crate::app::{
    App,
    AppCommand,
    Focus,
};

/// Symbols that need Shift on a US layout. Terminals report them without
/// the modifier; browsers report `shiftKey` for them.
const SHIFTED_SYMBOLS: &str = "~!@#$%^&*()_+{}|:\"<>?";

fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::F(n) => return Some(format!("F{n}")),
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        _ => return None,
    };
    Some(name.to_string())
}

/// Converts a terminal key press into the dispatcher's event model.
pub fn to_key_event(key: &TerminalKeyEvent, target: FocusTarget) -> Option<KeyEvent> {
    let name = key_name(key.code)?;
    let implied_shift = match key.code {
        KeyCode::Char(c) => c.is_ascii_uppercase() || SHIFTED_SYMBOLS.contains(c),
        KeyCode::BackTab => true,
        _ => false,
    };

    let mut event = KeyEvent::new(name).with_target(target);
    event.ctrl_key = key.modifiers.contains(KeyModifiers::CONTROL);
    event.meta_key = key
        .modifiers
        .intersects(KeyModifiers::SUPER | KeyModifiers::META);
    event.shift_key = implied_shift || key.modifiers.contains(KeyModifiers::SHIFT);
    event.alt_key = key.modifiers.contains(KeyModifiers::ALT);

    Some(event)
}

fn is_ctrl_c(key: &TerminalKeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Routes one key press: shortcuts first, then text editing in the search
/// field when no shortcut claimed the event.
pub fn handle_key(app: &mut App, document: &Document, key: &TerminalKeyEvent) {
    if is_ctrl_c(key) {
        app.apply(AppCommand::Quit);
        return;
    }

    let Some(event) = to_key_event(key, app.focus_target()) else {
        log::debug!("Ignoring unmapped key: {key:?}");
        return;
    };

    let event = document.dispatch(event);
    if event.default_prevented() {
        return;
    }

    handle_unbound_key(app, key);
}

pub fn handle_unbound_key(app: &mut App, key: &TerminalKeyEvent) {
    if app.focus != Focus::Search {
        return;
    }

    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            app.push_query_char(c);
        }
        KeyCode::Backspace => app.pop_query_char(),
        _ => {}
    }
}
