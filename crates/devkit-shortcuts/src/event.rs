use std::collections::HashMap;
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use crate::models::normalize_key;

const TEXT_ENTRY_TAGS: [&str; 2] = ["input", "textarea"];
const TEXT_ENTRY_ROLES: [&str; 2] = ["textbox", "searchbox"];

/// The element that had focus when a key was pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTarget {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub parent: Option<Box<FocusTarget>>,
}

impl FocusTarget {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: HashMap::new(),
            parent: None,
        }
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn with_parent(mut self, parent: FocusTarget) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &FocusTarget> {
        std::iter::successors(Some(self), |target| target.parent.as_deref())
    }

    /// Whether keystrokes on this element are expected to produce text.
    pub fn is_text_entry(&self) -> bool {
        if TEXT_ENTRY_TAGS.contains(&self.tag.as_str()) {
            return true;
        }

        self.ancestors()
            .any(|target| target.is_content_editable() || target.has_text_entry_role())
    }

    fn is_content_editable(&self) -> bool {
        self.attributes
            .get("contenteditable")
            .is_some_and(|value| !value.trim().eq_ignore_ascii_case("false"))
    }

    fn has_text_entry_role(&self) -> bool {
        self.attributes.get("role").is_some_and(|role| {
            TEXT_ENTRY_ROLES
                .iter()
                .any(|expected| role.trim().eq_ignore_ascii_case(expected))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub target: Option<FocusTarget>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_target(mut self, target: FocusTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn normalized_key(&self) -> String {
        normalize_key(&self.key)
    }

    pub fn in_text_entry(&self) -> bool {
        self.target
            .as_ref()
            .is_some_and(FocusTarget::is_text_entry)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

pub type ListenerId = u64;

pub type KeyListener = Arc<dyn Fn(&mut KeyEvent) + Send + Sync>;

/// Surface that delivers key-down events to registered listeners.
pub trait KeyEventSource: Send + Sync {
    fn add_key_listener(&self, listener: KeyListener) -> ListenerId;
    fn remove_key_listener(&self, id: ListenerId) -> bool;
    fn listener_count(&self) -> usize;
}

/// In-process key event source. Listeners run in registration order until
/// one of them stops propagation.
#[derive(Default)]
pub struct Document {
    listeners: Mutex<Vec<(ListenerId, KeyListener)>>,
    next_id: AtomicU64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, mut event: KeyEvent) -> KeyEvent {
        let listeners: Vec<KeyListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&mut event);
            if event.propagation_stopped() {
                break;
            }
        }

        event
    }
}

impl KeyEventSource for Document {
    fn add_key_listener(&self, listener: KeyListener) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn remove_key_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
