use std::any::Any;
use std::panic::{
    self,
    AssertUnwindSafe,
};
use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError,
};

use log::{
    debug,
    error,
    info,
    warn,
};

use crate::config::DispatcherConfig;
use crate::event::{
    KeyEvent,
    KeyEventSource,
    ListenerId,
};
use crate::models::{
    ShortcutDefinition,
    keys_match,
};
use crate::platform::Platform;
use crate::registry::ShortcutRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The dispatcher is inactive or disabled.
    Inactive,
    NoMatch,
    Handled { index: usize, succeeded: bool },
}

/// What an activation exposes to the host: the live registry and the
/// platform used for hint glyphs.
#[derive(Debug, Clone)]
pub struct ShortcutHandle {
    registry: ShortcutRegistry,
    platform: Platform,
}

impl ShortcutHandle {
    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_mac(&self) -> bool {
        self.platform.is_mac()
    }
}

#[derive(Debug, Default)]
struct DispatchState {
    registry: ShortcutRegistry,
    config: DispatcherConfig,
    active: bool,
}

struct Shared {
    state: Mutex<DispatchState>,
    platform: Platform,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, DispatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, event: &mut KeyEvent) -> DispatchOutcome {
        let (registry, config) = {
            let state = self.lock_state();
            if !state.active || !state.config.enabled {
                return DispatchOutcome::Inactive;
            }
            (state.registry.clone(), state.config)
        };

        let in_text_entry = event.in_text_entry();
        let pressed = event.normalized_key();

        if config.debug {
            debug!(
                "Key event: key={:?} ctrl={} meta={} shift={} alt={} text_entry={}",
                pressed,
                event.ctrl_key,
                event.meta_key,
                event.shift_key,
                event.alt_key,
                in_text_entry
            );
        }

        let matched = registry.iter().enumerate().find(|(_, definition)| {
            (!in_text_entry || definition.allow_in_inputs)
                && keys_match(&definition.normalized_key(), &pressed)
                && modifiers_match(definition, event)
        });

        let Some((index, definition)) = matched else {
            if config.debug {
                debug!("No shortcut matched {:?}", pressed);
            }
            return DispatchOutcome::NoMatch;
        };

        if config.debug {
            debug!(
                "Matched shortcut #{} '{}' ({})",
                index,
                label(definition),
                definition.category
            );
        }

        if config.prevent_default {
            event.prevent_default();
            event.stop_propagation();
        }

        let succeeded = run_action(definition);
        DispatchOutcome::Handled { index, succeeded }
    }
}

fn modifiers_match(definition: &ShortcutDefinition, event: &KeyEvent) -> bool {
    definition.ctrl_key == event.ctrl_key
        && definition.meta_key == event.meta_key
        && definition.shift_key == event.shift_key
        && definition.alt_key == event.alt_key
}

fn label(definition: &ShortcutDefinition) -> &str {
    if definition.description.is_empty() {
        definition.key.as_str()
    } else {
        definition.description.as_str()
    }
}

fn run_action(definition: &ShortcutDefinition) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| definition.action.execute())) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!("Shortcut '{}' action failed: {:#}", label(definition), e);
            false
        }
        Err(payload) => {
            error!(
                "Shortcut '{}' action panicked: {}",
                label(definition),
                panic_message(payload.as_ref())
            );
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

fn warn_conflicts(registry: &ShortcutRegistry) {
    for conflict in registry.find_conflicts() {
        if let (Some(winner), Some(shadowed)) =
            (registry.get(conflict.winner), registry.get(conflict.shadowed))
        {
            warn!(
                "Shortcut '{}' (#{}) is unreachable: '{}' (#{}) uses the same keys",
                label(shadowed),
                conflict.shadowed,
                label(winner),
                conflict.winner
            );
        }
    }
}

/// Binds a single key listener on a [`KeyEventSource`] while active and
/// resolves each key-down event to at most one shortcut.
pub struct ShortcutDispatcher {
    source: Arc<dyn KeyEventSource>,
    shared: Arc<Shared>,
    listener: Mutex<Option<ListenerId>>,
}

impl ShortcutDispatcher {
    pub fn new(source: Arc<dyn KeyEventSource>, platform: Platform) -> Self {
        Self {
            source,
            shared: Arc::new(Shared {
                state: Mutex::new(DispatchState::default()),
                platform,
            }),
            listener: Mutex::new(None),
        }
    }

    pub fn platform(&self) -> Platform {
        self.shared.platform
    }

    pub fn is_active(&self) -> bool {
        self.lock_listener().is_some()
    }

    pub fn config(&self) -> DispatcherConfig {
        self.shared.lock_state().config
    }

    pub fn handle(&self) -> ShortcutHandle {
        ShortcutHandle {
            registry: self.shared.lock_state().registry.clone(),
            platform: self.shared.platform,
        }
    }

    /// Installs `registry` as the matching set and starts listening unless
    /// `config.enabled` is false. Activating again swaps the registry without
    /// adding a second listener.
    pub fn activate(
        &self, registry: impl Into<ShortcutRegistry>, config: DispatcherConfig,
    ) -> ShortcutHandle {
        let registry = registry.into();

        if config.warn_on_duplicates {
            warn_conflicts(&registry);
        }

        {
            let mut state = self.shared.lock_state();
            if !state.registry.ptr_eq(&registry) {
                debug!("Installing {} shortcut definitions", registry.len());
            }
            state.registry = registry;
            state.config = config;
        }

        if config.enabled {
            self.bind();
        } else {
            self.unbind();
        }

        self.handle()
    }

    pub fn deactivate(&self) {
        self.unbind();
    }

    /// Runs the resolution algorithm for one event. The bound listener calls
    /// this for every event the source delivers.
    pub fn handle_key_event(&self, event: &mut KeyEvent) -> DispatchOutcome {
        self.shared.handle(event)
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<ListenerId>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bind(&self) {
        let mut listener = self.lock_listener();
        if listener.is_some() {
            return;
        }

        let shared = self.shared.clone();
        let id = self
            .source
            .add_key_listener(Arc::new(move |event: &mut KeyEvent| {
                shared.handle(event);
            }));

        *listener = Some(id);
        self.shared.lock_state().active = true;
        info!(
            "Keyboard shortcuts active on {} platform",
            self.shared.platform
        );
    }

    fn unbind(&self) {
        let mut listener = self.lock_listener();
        let Some(id) = listener.take() else {
            return;
        };

        self.shared.lock_state().active = false;
        if !self.source.remove_key_listener(id) {
            warn!("Key listener {} was already removed from its source", id);
        }
        info!("Keyboard shortcuts deactivated");
    }
}

impl Drop for ShortcutDispatcher {
    fn drop(&mut self) {
        self.unbind();
    }
}
