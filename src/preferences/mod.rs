//! Theme and accent-color state, persisted independently of the session.
//!
//! Preferences survive logout: clearing credentials never touches the
//! `theme` and `accentColor` keys.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::errors::StoreError;
use crate::storage::LocalStore;

/// Store key holding the color scheme.
const THEME_KEY: &str = "theme";
/// Store key holding the accent color.
const ACCENT_COLOR_KEY: &str = "accentColor";

/// Accent the UI ships with.
pub const DEFAULT_ACCENT_COLOR: &str = "#3B82F6";

/// UI color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other scheme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_stored(raw: &str) -> Option<Theme> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
struct State {
    theme: Theme,
    accent_color: String,
}

impl Default for State {
    fn default() -> Self {
        State {
            theme: Theme::default(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

/// Owns display preferences and their persistence.
#[derive(Debug)]
pub struct PreferenceManager {
    store: Arc<LocalStore>,
    state: RwLock<State>,
}

impl PreferenceManager {
    /// Starts on the defaults: light theme, stock accent.
    pub fn new(store: Arc<LocalStore>) -> Self {
        PreferenceManager {
            store,
            state: RwLock::new(State::default()),
        }
    }

    /// Rehydrates persisted preferences. Missing, empty or unrecognized
    /// values keep their defaults. Call once at startup.
    pub fn restore(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(theme) = self
            .store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::from_stored)
        {
            state.theme = theme;
        }
        if let Some(color) = self.store.get(ACCENT_COLOR_KEY) {
            if !color.is_empty() {
                state.accent_color = color;
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .theme
    }

    pub fn accent_color(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .accent_color
            .clone()
    }

    /// Flips light/dark, persists immediately and returns the new scheme.
    /// The in-memory value changes even if persisting fails, so the screen
    /// the user is looking at always reflects the toggle.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let next = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.theme = state.theme.toggled();
            state.theme
        };
        self.store.set(THEME_KEY, next.as_str())?;
        Ok(next)
    }

    /// Persists a new accent. Any string is accepted; the UI owns the
    /// palette.
    pub fn set_accent_color(&self, color: &str) -> Result<(), StoreError> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.accent_color = color.to_string();
        }
        self.store.set(ACCENT_COLOR_KEY, color)
    }
}
