//! Light/dark theme preference, stored next to the issue snapshot.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use neighborsolve_store::{BackendExt, PersistenceBackend};

use crate::error::Result;
use crate::issue_store::IssueStore;

/// UI theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon on the toggle button: a sun offers the way back from dark.
    pub const fn icon(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<B: PersistenceBackend> IssueStore<B> {
    /// The stored theme, or light when none (or an unrecognized one) is stored.
    pub fn theme(&self) -> Result<Theme> {
        let Some(raw) = self.backend.read_string(&self.config.theme_key)? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "unrecognized stored theme, using light");
            Theme::default()
        }))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.backend.write_str(&self.config.theme_key, theme.as_str())?;
        debug!(%theme, "theme saved");
        Ok(())
    }

    /// Flip and persist the theme, returning the new one.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue_store::StoreConfig;
    use neighborsolve_store::MemoryBackend;

    #[test]
    fn test_theme_strings() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.icon(), "fas fa-sun");
        assert_eq!(Theme::Light.icon(), "fas fa-moon");
    }

    #[test]
    fn test_theme_defaults_to_light() {
        let store = IssueStore::open(MemoryBackend::new(), StoreConfig::default()).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let store = IssueStore::open(MemoryBackend::new(), StoreConfig::default()).unwrap();
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(store.backend().read_string("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let backend = MemoryBackend::with_entries([("theme", "neon")]);
        let store = IssueStore::open(backend, StoreConfig::default()).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Light);
    }
}
