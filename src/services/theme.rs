//! Theme preference and resolution.
//!
//! The stored preference may defer to the system (`system`); resolution
//! collapses it to `light` or `dark` given the client's color-scheme signal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::prefs::{PrefStore, PrefsError};

pub const THEME_KEY: &str = "theme";

/// Serializes lowercase; deserializes through [`FromStr`], so stored and
/// submitted values share one parse rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown theme {0:?} (expected light, dark or system)")]
pub struct ThemeParseError(pub String);

impl Theme {
    #[must_use]
    pub fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::System if prefers_dark => ResolvedTheme::Dark,
            Self::System => ResolvedTheme::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = ThemeParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Stored theme, `system` if unset or unreadable.
#[must_use]
pub fn load_theme(prefs: &PrefStore) -> Theme {
    prefs.get(THEME_KEY, Theme::default())
}

/// Persist the theme preference.
///
/// # Errors
///
/// Returns an error if the preference file cannot be written.
pub fn save_theme(prefs: &PrefStore, theme: Theme) -> Result<(), PrefsError> {
    prefs.set(THEME_KEY, &theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_themes_ignore_system_signal() {
        assert_eq!(Theme::Light.resolve(true), ResolvedTheme::Light);
        assert_eq!(Theme::Dark.resolve(false), ResolvedTheme::Dark);
    }

    #[test]
    fn system_follows_signal() {
        assert_eq!(Theme::System.resolve(true), ResolvedTheme::Dark);
        assert_eq!(Theme::System.resolve(false), ResolvedTheme::Light);
    }

    #[test]
    fn parse_accepts_known_names() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("system".parse::<Theme>(), Ok(Theme::System));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!("sepia".parse::<Theme>(), Err(ThemeParseError("sepia".into())));
    }

    #[test]
    fn deserialize_shares_from_str_rules() {
        assert_eq!(serde_json::from_str::<Theme>("\"Dark\"").unwrap(), Theme::Dark);
        let err = serde_json::from_str::<Theme>("\"sepia\"").unwrap_err();
        assert!(err.to_string().contains("unknown theme"));
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn load_defaults_to_system() {
        let prefs = PrefStore::in_memory();
        assert_eq!(load_theme(&prefs), Theme::System);
    }

    #[test]
    fn save_then_load() {
        let prefs = PrefStore::in_memory();
        save_theme(&prefs, Theme::Dark).unwrap();
        assert_eq!(load_theme(&prefs), Theme::Dark);
        assert_eq!(prefs.get(THEME_KEY, String::new()), "dark");
    }

    #[test]
    fn load_ignores_garbage_value() {
        let prefs = PrefStore::in_memory();
        prefs.set(THEME_KEY, &"neon").unwrap();
        assert_eq!(load_theme(&prefs), Theme::System);
    }
}
