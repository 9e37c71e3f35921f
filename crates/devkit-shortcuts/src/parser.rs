use std::collections::HashMap;

use crate::models::{
    SPACE_KEY,
    ShortcutDefinition,
    ShortcutError,
    ShortcutResult,
};
use crate::platform::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedShortcut {
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub display_string: String,
}

/// Parses chord strings such as `Ctrl+Shift+K` or `Mod+K` and renders
/// definitions back for help surfaces.
///
/// `Mod` resolves to the platform's primary modifier.
pub struct ShortcutParser {
    platform: Platform,
    key_mappings: HashMap<&'static str, &'static str>,
}

impl ShortcutParser {
    pub fn new(platform: Platform) -> Self {
        let mut key_mappings = HashMap::new();

        for (name, key) in [
            ("esc", "Escape"),
            ("escape", "Escape"),
            ("enter", "Enter"),
            ("return", "Enter"),
            ("tab", "Tab"),
            ("space", SPACE_KEY),
            ("spacebar", SPACE_KEY),
            ("backspace", "Backspace"),
            ("delete", "Delete"),
            ("del", "Delete"),
            ("insert", "Insert"),
            ("home", "Home"),
            ("end", "End"),
            ("pageup", "PageUp"),
            ("pagedown", "PageDown"),
            ("arrowup", "ArrowUp"),
            ("up", "ArrowUp"),
            ("arrowdown", "ArrowDown"),
            ("down", "ArrowDown"),
            ("arrowleft", "ArrowLeft"),
            ("left", "ArrowLeft"),
            ("arrowright", "ArrowRight"),
            ("right", "ArrowRight"),
            ("plus", "+"),
            ("comma", ","),
            ("period", "."),
            ("slash", "/"),
            ("question", "?"),
            ("f1", "F1"),
            ("f2", "F2"),
            ("f3", "F3"),
            ("f4", "F4"),
            ("f5", "F5"),
            ("f6", "F6"),
            ("f7", "F7"),
            ("f8", "F8"),
            ("f9", "F9"),
            ("f10", "F10"),
            ("f11", "F11"),
            ("f12", "F12"),
        ] {
            key_mappings.insert(name, key);
        }

        Self {
            platform,
            key_mappings,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn parse(&self, shortcut_str: &str) -> ShortcutResult<ParsedShortcut> {
        if shortcut_str.trim().is_empty() {
            return Err(ShortcutError::InvalidShortcut(
                "Empty shortcut string".to_string(),
            ));
        }

        let mut parsed = ParsedShortcut {
            key: String::new(),
            ctrl_key: false,
            meta_key: false,
            shift_key: false,
            alt_key: false,
            display_string: String::new(),
        };
        let mut key = None;

        for part in shortcut_str.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => parsed.ctrl_key = true,
                "shift" => parsed.shift_key = true,
                "alt" | "option" => parsed.alt_key = true,
                "cmd" | "command" | "meta" | "super" => parsed.meta_key = true,
                "mod" => {
                    if self.platform.is_mac() {
                        parsed.meta_key = true;
                    } else {
                        parsed.ctrl_key = true;
                    }
                }
                "" => {
                    return Err(ShortcutError::InvalidShortcut(format!(
                        "Empty key segment in: {}",
                        shortcut_str
                    )));
                }
                other => {
                    if key.is_some() {
                        return Err(ShortcutError::InvalidShortcut(format!(
                            "Multiple keys specified: {}",
                            shortcut_str
                        )));
                    }
                    key = Some(self.canonical_key(other, part)?);
                }
            }
        }

        parsed.key = key
            .ok_or_else(|| ShortcutError::InvalidShortcut("No key specified".to_string()))?;
        parsed.display_string = format_chord(
            self.platform,
            &parsed.key,
            parsed.ctrl_key,
            parsed.meta_key,
            parsed.shift_key,
            parsed.alt_key,
        );

        Ok(parsed)
    }

    fn canonical_key(&self, lowercase: &str, original: &str) -> ShortcutResult<String> {
        if let Some(key) = self.key_mappings.get(lowercase) {
            return Ok((*key).to_string());
        }

        if lowercase.chars().count() == 1 {
            return Ok(lowercase.to_string());
        }

        Err(ShortcutError::InvalidShortcut(format!(
            "Unknown key: {}",
            original
        )))
    }

    pub fn normalize_shortcut(&self, shortcut_str: &str) -> ShortcutResult<String> {
        Ok(self.parse(shortcut_str)?.display_string)
    }

    pub fn validate_shortcut(&self, shortcut_str: &str) -> bool {
        self.parse(shortcut_str).is_ok()
    }

    /// Hint text for a definition: `⇧⌘K` on mac, `Ctrl+Shift+K` elsewhere.
    /// Mac glyphs follow the `⌃⌥⇧⌘` order.
    pub fn format(&self, definition: &ShortcutDefinition) -> String {
        format_chord(
            self.platform,
            &definition.normalized_key(),
            definition.ctrl_key,
            definition.meta_key,
            definition.shift_key,
            definition.alt_key,
        )
    }
}

fn format_chord(
    platform: Platform, key: &str, ctrl: bool, meta: bool, shift: bool, alt: bool,
) -> String {
    let key = format_key_display(platform, key);

    if platform.is_mac() {
        let mut display = String::new();
        for (held, glyph) in [(ctrl, "⌃"), (alt, "⌥"), (shift, "⇧"), (meta, "⌘")] {
            if held {
                display.push_str(glyph);
            }
        }
        display.push_str(&key);
        return display;
    }

    let meta_label = if platform == Platform::Windows {
        "Win"
    } else {
        "Meta"
    };
    let mut parts: Vec<&str> = [
        (ctrl, "Ctrl"),
        (alt, "Alt"),
        (shift, "Shift"),
        (meta, meta_label),
    ]
    .into_iter()
    .filter_map(|(held, label)| held.then_some(label))
    .collect();
    parts.push(&key);
    parts.join("+")
}

fn format_key_display(platform: Platform, key: &str) -> String {
    match (platform.is_mac(), key) {
        (true, "ArrowUp") => "↑".to_string(),
        (true, "ArrowDown") => "↓".to_string(),
        (true, "ArrowLeft") => "←".to_string(),
        (true, "ArrowRight") => "→".to_string(),
        (true, "Enter") => "↩".to_string(),
        (false, "ArrowUp") => "Up".to_string(),
        (false, "ArrowDown") => "Down".to_string(),
        (false, "ArrowLeft") => "Left".to_string(),
        (false, "ArrowRight") => "Right".to_string(),
        (_, "Escape") => "Esc".to_string(),
        (_, key) if key.chars().count() == 1 => key.to_uppercase(),
        (_, key) => key.to_string(),
    }
}
