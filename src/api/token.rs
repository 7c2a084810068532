use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the current bearer token.
///
/// The session manager writes it on login, restore and logout; the API
/// client reads it while building each request. Clones share one cell, so
/// a token set through any handle is visible to all of them.
#[derive(Debug, Clone, Default)]
pub struct TokenCell(Arc<RwLock<Option<String>>>);

impl TokenCell {
    pub fn new() -> Self {
        TokenCell::default()
    }

    /// Current token, if any.
    pub fn get(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
