use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{
    Deserialize,
    Serialize,
};

use crate::models::ShortcutError;

const MAC_IDENTIFIERS: [&str; 4] = ["iphone", "ipad", "ipod", "ios"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Windows,
    Unknown,
}

impl Platform {
    /// Classifies a host platform identifier such as `MacIntel`, `Win32`,
    /// `macos` or `linux`.
    pub fn detect(identifier: &str) -> Self {
        let identifier = identifier.trim().to_lowercase();

        if identifier.contains("mac")
            || identifier.contains("darwin")
            || MAC_IDENTIFIERS.contains(&identifier.as_str())
        {
            Self::Mac
        } else if identifier.contains("win") {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    /// The platform this process runs on, classified once.
    pub fn current() -> Self {
        static CURRENT: OnceLock<Platform> = OnceLock::new();
        *CURRENT.get_or_init(|| Self::detect(std::env::consts::OS))
    }

    pub fn is_mac(self) -> bool {
        self == Self::Mac
    }

    pub fn primary_modifier_label(self) -> &'static str {
        match self {
            Self::Mac => "⌘",
            Self::Windows | Self::Unknown => "Ctrl",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mac => "mac",
            Self::Windows => "windows",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mac" | "macos" => Ok(Self::Mac),
            "windows" | "win" => Ok(Self::Windows),
            "unknown" | "linux" | "other" => Ok(Self::Unknown),
            other => Err(ShortcutError::UnknownPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mac_identifiers() {
        for identifier in ["MacIntel", "macos", "Macintosh", "darwin", "iPhone", "iPad"] {
            assert_eq!(Platform::detect(identifier), Platform::Mac, "{identifier}");
        }
    }

    #[test]
    fn test_detect_windows_identifiers() {
        for identifier in ["Win32", "windows", "Win64"] {
            assert_eq!(
                Platform::detect(identifier),
                Platform::Windows,
                "{identifier}"
            );
        }
    }

    #[test]
    fn test_detect_falls_back_to_unknown() {
        for identifier in ["linux", "Linux x86_64", "freebsd", ""] {
            assert_eq!(
                Platform::detect(identifier),
                Platform::Unknown,
                "{identifier}"
            );
        }
    }

    #[test]
    fn test_current_is_stable() {
        assert_eq!(Platform::current(), Platform::current());
        assert_eq!(
            Platform::current(),
            Platform::detect(std::env::consts::OS)
        );
    }

    #[test]
    fn test_primary_modifier_label() {
        assert_eq!(Platform::Mac.primary_modifier_label(), "⌘");
        assert_eq!(Platform::Windows.primary_modifier_label(), "Ctrl");
        assert_eq!(Platform::Unknown.primary_modifier_label(), "Ctrl");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mac".parse::<Platform>().unwrap(), Platform::Mac);
        assert_eq!("Windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Unknown);
        assert!("amiga".parse::<Platform>().is_err());
    }
}
