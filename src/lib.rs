#![doc(test(attr(deny(warnings))))]

//! BankApp Core is the client-side engine of the BankApp personal finance
//! app: form validation, typed access to the finance API, and the session
//! and preference state a UI shell consumes.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod preferences;
pub mod session;
pub mod storage;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("BankApp Core tracing initialized.");
    });
}
