pub mod builders;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod models;
pub mod parser;
pub mod platform;
pub mod registry;

pub use builders::{
    ShortcutOptions,
    ShortcutPattern,
    create_cross_platform_shortcut,
    create_shortcut,
};
pub use config::DispatcherConfig;
pub use dispatcher::{
    DispatchOutcome,
    ShortcutDispatcher,
    ShortcutHandle,
};
pub use event::{
    Document,
    FocusTarget,
    KeyEvent,
    KeyEventSource,
    KeyListener,
    ListenerId,
};
pub use models::{
    ShortcutAction,
    ShortcutDefinition,
    ShortcutError,
    ShortcutResult,
};
pub use parser::{
    ParsedShortcut,
    ShortcutParser,
};
pub use platform::Platform;
pub use registry::{
    ShortcutConflict,
    ShortcutRegistry,
};
