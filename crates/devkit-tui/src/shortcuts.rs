use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

use anyhow::{
    Context,
    Result,
    anyhow,
    bail,
};
use devkit_shortcuts::{
    Platform,
    ShortcutAction,
    ShortcutDefinition,
    ShortcutOptions,
    ShortcutPattern,
    ShortcutRegistry,
    create_shortcut,
};

use crate::app::AppCommand;

fn send(sender: &Sender<AppCommand>, command: AppCommand) -> ShortcutAction {
    let sender = sender.clone();
    ShortcutAction::new(move || {
        sender
            .send(command)
            .map_err(|e| anyhow!("UI loop is gone, dropped {:?}", e.0))
    })
}

fn pattern_command(pattern: ShortcutPattern) -> AppCommand {
    match pattern {
        ShortcutPattern::SearchFocus => AppCommand::FocusSearch,
        ShortcutPattern::NextItem => AppCommand::SelectNext,
        ShortcutPattern::PreviousItem => AppCommand::SelectPrevious,
        ShortcutPattern::ShowHelp => AppCommand::ToggleHelp,
        ShortcutPattern::CloseDialog => AppCommand::Escape,
        ShortcutPattern::CopyResult => AppCommand::CopySelected,
    }
}

/// Shortcuts of the launcher, in priority order. `bindings` maps pattern ids
/// to chords that replace the pattern's default keys.
pub fn build_registry(
    platform: Platform, bindings: &BTreeMap<String, String>, sender: &Sender<AppCommand>,
) -> Result<ShortcutRegistry> {
    let mut chords: BTreeMap<ShortcutPattern, &str> = BTreeMap::new();
    for (id, chord) in bindings {
        let pattern = id
            .parse::<ShortcutPattern>()
            .with_context(|| format!("Invalid entry in bindings: {id}"))?;
        if chords.insert(pattern, chord.as_str()).is_some() {
            bail!("Binding for {pattern} is given more than once");
        }
    }

    let mut definitions: Vec<ShortcutDefinition> = Vec::new();

    for pattern in ShortcutPattern::ALL {
        let action = send(sender, pattern_command(pattern));
        let definition = match chords.get(&pattern) {
            Some(chord) => pattern
                .build_with_chord(platform, chord, action)
                .with_context(|| format!("Invalid chord for {pattern}: {chord}"))?,
            None => pattern.build(platform, action),
        };
        definitions.push(definition);
    }

    definitions.extend([
        create_shortcut(
            "ArrowDown",
            send(sender, AppCommand::SelectNext),
            "Next item",
            "Navigation",
            ShortcutOptions {
                allow_in_inputs: true,
                ..Default::default()
            },
        ),
        create_shortcut(
            "ArrowUp",
            send(sender, AppCommand::SelectPrevious),
            "Previous item",
            "Navigation",
            ShortcutOptions {
                allow_in_inputs: true,
                ..Default::default()
            },
        ),
        create_shortcut(
            "Enter",
            send(sender, AppCommand::OpenSelected),
            "Open tool",
            "Actions",
            ShortcutOptions {
                allow_in_inputs: true,
                ..Default::default()
            },
        ),
        create_shortcut(
            "q",
            send(sender, AppCommand::Quit),
            "Quit",
            "General",
            ShortcutOptions::default(),
        ),
    ]);

    Ok(ShortcutRegistry::new(definitions))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::mpsc;

    use devkit_shortcuts::{
        DispatcherConfig,
        Document,
        KeyEvent,
        ShortcutDispatcher,
    };

    use super::*;
    use crate::app::App;

    #[test]
    fn test_default_registry_has_no_conflicts() {
        let (sender, _receiver) = mpsc::channel();

        for platform in [Platform::Mac, Platform::Windows, Platform::Unknown] {
            let registry = build_registry(platform, &BTreeMap::new(), &sender).unwrap();
            assert!(registry.find_conflicts().is_empty(), "{platform}");
            assert_eq!(registry.len(), ShortcutPattern::ALL.len() + 4);
        }
    }

    #[test]
    fn test_binding_overrides_pattern_chord() {
        let (sender, _receiver) = mpsc::channel();
        let bindings = BTreeMap::from([("search-focus".to_string(), "Mod+P".to_string())]);

        let registry = build_registry(Platform::Mac, &bindings, &sender).unwrap();
        let search = registry
            .iter()
            .find(|definition| definition.description == "Focus search")
            .unwrap();

        assert_eq!(search.key, "p");
        assert!(search.meta_key);
    }

    #[test]
    fn test_binding_id_is_case_insensitive() {
        let (sender, _receiver) = mpsc::channel();
        let bindings = BTreeMap::from([("Search-Focus".to_string(), "Mod+P".to_string())]);

        let registry = build_registry(Platform::Windows, &bindings, &sender).unwrap();
        let search = registry
            .iter()
            .find(|definition| definition.description == "Focus search")
            .unwrap();

        assert_eq!(search.key, "p");
        assert!(search.ctrl_key);
    }

    #[test]
    fn test_same_binding_in_two_casings_is_an_error() {
        let (sender, _receiver) = mpsc::channel();
        let bindings = BTreeMap::from([
            ("next-item".to_string(), "n".to_string()),
            ("NEXT-ITEM".to_string(), "m".to_string()),
        ]);

        let err = build_registry(Platform::Unknown, &bindings, &sender).unwrap_err();

        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_unknown_binding_is_an_error() {
        let (sender, _receiver) = mpsc::channel();
        let bindings = BTreeMap::from([("launch-rockets".to_string(), "Ctrl+L".to_string())]);

        let err = build_registry(Platform::Mac, &bindings, &sender).unwrap_err();

        assert!(format!("{err:#}").contains("launch-rockets"));
    }

    #[test]
    fn test_invalid_chord_is_an_error() {
        let (sender, _receiver) = mpsc::channel();
        let bindings = BTreeMap::from([("next-item".to_string(), "Ctrl+Shift".to_string())]);

        assert!(build_registry(Platform::Windows, &bindings, &sender).is_err());
    }

    #[test]
    fn test_actions_send_commands() {
        let document = Arc::new(Document::new());
        let dispatcher = ShortcutDispatcher::new(document.clone(), Platform::Windows);
        let (sender, receiver) = mpsc::channel();
        let registry = build_registry(Platform::Windows, &BTreeMap::new(), &sender).unwrap();
        dispatcher.activate(registry, DispatcherConfig::default());

        let mut app = App::new();
        document.dispatch(KeyEvent::new("k").with_ctrl().with_target(app.focus_target()));
        document.dispatch(KeyEvent::new("j").with_target(app.focus_target()));

        let commands: Vec<AppCommand> = receiver.try_iter().collect();
        assert_eq!(
            commands,
            vec![AppCommand::FocusSearch, AppCommand::SelectNext]
        );

        for command in commands {
            app.apply(command);
        }
        let event = document.dispatch(KeyEvent::new("j").with_target(app.focus_target()));

        assert!(!event.default_prevented());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_reported_as_action_failure() {
        let document = Arc::new(Document::new());
        let dispatcher = ShortcutDispatcher::new(document, Platform::Unknown);
        let (sender, receiver) = mpsc::channel();
        let registry = build_registry(Platform::Unknown, &BTreeMap::new(), &sender).unwrap();
        dispatcher.activate(registry, DispatcherConfig::default());
        drop(receiver);

        let mut event = KeyEvent::new("q");
        let outcome = dispatcher.handle_key_event(&mut event);

        assert!(matches!(
            outcome,
            devkit_shortcuts::DispatchOutcome::Handled {
                succeeded: false,
                ..
            }
        ));
        assert!(dispatcher.is_active());
    }
}
