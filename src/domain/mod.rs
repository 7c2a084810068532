//! Data model for the finance API: entities as the server returns them and
//! the request payloads the client sends.
//!
//! The wire format keeps the API's Portuguese field names; `serde` renames
//! bridge them to the English identifiers used everywhere else.

pub mod account;
pub mod category;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountPatch, NewAccount};
pub use category::{Category, CategoryPayload};
pub use transaction::{
    NewTransaction, PaymentMethod, Period, Transaction, TransactionKind, TransactionPatch,
    UnknownVariant,
};
pub use user::{LoginResponse, UserProfile};
