use std::fmt;
use std::sync::Arc;

pub const SPACE_KEY: &str = "Space";

type ActionFn = dyn Fn() -> anyhow::Result<()> + Send + Sync;

/// Callback bound to a shortcut. Cloning shares the same closure.
#[derive(Clone)]
pub struct ShortcutAction {
    handler: Arc<ActionFn>,
}

impl ShortcutAction {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn noop() -> Self {
        Self::new(|| Ok(()))
    }

    pub fn execute(&self) -> anyhow::Result<()> {
        (self.handler)()
    }
}

impl fmt::Debug for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShortcutAction(..)")
    }
}

/// One bindable keyboard shortcut.
///
/// Every modifier flag is checked exactly: `true` means the modifier must be
/// held, `false` means it must not be.
#[derive(Debug, Clone)]
pub struct ShortcutDefinition {
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub description: String,
    pub category: String,
    pub allow_in_inputs: bool,
    pub action: ShortcutAction,
}

impl ShortcutDefinition {
    pub fn new(key: impl Into<String>, action: ShortcutAction) -> Self {
        Self {
            key: key.into(),
            ctrl_key: false,
            meta_key: false,
            shift_key: false,
            alt_key: false,
            description: String::new(),
            category: String::new(),
            allow_in_inputs: false,
            action,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn allow_in_inputs(mut self, allow: bool) -> Self {
        self.allow_in_inputs = allow;
        self
    }

    pub fn normalized_key(&self) -> String {
        normalize_key(&self.key)
    }

    /// Key plus modifier bitmask, the identity two definitions collide on.
    pub fn chord_signature(&self) -> (String, u8) {
        (
            self.normalized_key().to_lowercase(),
            modifier_mask(self.ctrl_key, self.meta_key, self.shift_key, self.alt_key),
        )
    }
}

pub fn normalize_key(key: &str) -> String {
    if key == " " {
        SPACE_KEY.to_string()
    } else {
        key.to_string()
    }
}

pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

pub(crate) fn modifier_mask(ctrl: bool, meta: bool, shift: bool, alt: bool) -> u8 {
    (ctrl as u8) | (shift as u8) << 1 | (alt as u8) << 2 | (meta as u8) << 3
}

pub type ShortcutResult<T> = Result<T, ShortcutError>;

#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
    #[error("Invalid shortcut key: {0}")]
    InvalidShortcut(String),

    #[error("Unknown shortcut pattern: {0}")]
    UnknownPattern(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
