use std::fmt;
use std::str::FromStr;

use crate::models::{
    ShortcutAction,
    ShortcutDefinition,
    ShortcutError,
    ShortcutResult,
};
use crate::parser::ShortcutParser;
use crate::platform::Platform;

/// Overrides for [`create_shortcut`]. Anything left at `Default` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortcutOptions {
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub allow_in_inputs: bool,
}

pub fn create_shortcut(
    key: impl Into<String>, action: ShortcutAction, description: impl Into<String>,
    category: impl Into<String>, options: ShortcutOptions,
) -> ShortcutDefinition {
    ShortcutDefinition {
        key: key.into(),
        ctrl_key: options.ctrl_key,
        meta_key: options.meta_key,
        shift_key: options.shift_key,
        alt_key: options.alt_key,
        description: description.into(),
        category: category.into(),
        allow_in_inputs: options.allow_in_inputs,
        action,
    }
}

/// Binds `key` to the platform's primary modifier: Cmd on mac, Ctrl elsewhere.
/// The remaining options are forwarded unchanged.
pub fn create_cross_platform_shortcut(
    platform: Platform, key: impl Into<String>, action: ShortcutAction,
    description: impl Into<String>, category: impl Into<String>, options: ShortcutOptions,
) -> ShortcutDefinition {
    let options = ShortcutOptions {
        meta_key: platform.is_mac(),
        ctrl_key: !platform.is_mac(),
        ..options
    };
    create_shortcut(key, action, description, category, options)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShortcutPattern {
    SearchFocus,
    NextItem,
    PreviousItem,
    ShowHelp,
    CloseDialog,
    CopyResult,
}

impl ShortcutPattern {
    pub const ALL: [ShortcutPattern; 6] = [
        Self::SearchFocus,
        Self::NextItem,
        Self::PreviousItem,
        Self::ShowHelp,
        Self::CloseDialog,
        Self::CopyResult,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::SearchFocus => "search-focus",
            Self::NextItem => "next-item",
            Self::PreviousItem => "previous-item",
            Self::ShowHelp => "show-help",
            Self::CloseDialog => "close-dialog",
            Self::CopyResult => "copy-result",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SearchFocus => "Focus search",
            Self::NextItem => "Next item",
            Self::PreviousItem => "Previous item",
            Self::ShowHelp => "Show keyboard shortcuts",
            Self::CloseDialog => "Close dialog or leave field",
            Self::CopyResult => "Copy result",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::SearchFocus | Self::NextItem | Self::PreviousItem => "Navigation",
            Self::ShowHelp | Self::CloseDialog => "General",
            Self::CopyResult => "Actions",
        }
    }

    fn allow_in_inputs(self) -> bool {
        matches!(
            self,
            Self::SearchFocus | Self::CloseDialog | Self::CopyResult
        )
    }

    pub fn build(self, platform: Platform, action: ShortcutAction) -> ShortcutDefinition {
        let description = self.description();
        let category = self.category();
        let allow_in_inputs = self.allow_in_inputs();

        match self {
            Self::SearchFocus => create_cross_platform_shortcut(
                platform,
                "k",
                action,
                description,
                category,
                ShortcutOptions {
                    allow_in_inputs,
                    ..Default::default()
                },
            ),
            Self::NextItem => create_shortcut(
                "j",
                action,
                description,
                category,
                ShortcutOptions::default(),
            ),
            Self::PreviousItem => create_shortcut(
                "k",
                action,
                description,
                category,
                ShortcutOptions::default(),
            ),
            Self::ShowHelp => create_shortcut(
                "?",
                action,
                description,
                category,
                ShortcutOptions {
                    shift_key: true,
                    ..Default::default()
                },
            ),
            Self::CloseDialog => create_shortcut(
                "Escape",
                action,
                description,
                category,
                ShortcutOptions {
                    allow_in_inputs,
                    ..Default::default()
                },
            ),
            Self::CopyResult => create_cross_platform_shortcut(
                platform,
                "c",
                action,
                description,
                category,
                ShortcutOptions {
                    shift_key: true,
                    allow_in_inputs,
                    ..Default::default()
                },
            ),
        }
    }

    /// Same description, category and input policy as [`Self::build`], with
    /// the key and modifiers taken from `chord` (for example `Mod+P`).
    pub fn build_with_chord(
        self, platform: Platform, chord: &str, action: ShortcutAction,
    ) -> ShortcutResult<ShortcutDefinition> {
        let parsed = ShortcutParser::new(platform).parse(chord)?;

        Ok(create_shortcut(
            parsed.key,
            action,
            self.description(),
            self.category(),
            ShortcutOptions {
                ctrl_key: parsed.ctrl_key,
                meta_key: parsed.meta_key,
                shift_key: parsed.shift_key,
                alt_key: parsed.alt_key,
                allow_in_inputs: self.allow_in_inputs(),
            },
        ))
    }
}

impl fmt::Display for ShortcutPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ShortcutPattern {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShortcutError::UnknownPattern(s.to_string()))
    }
}
