//! Core of the todos server: the per-session list store.
//!
//! Lists and todos are addressed by their position in storage, so every
//! lookup is bounds-checked and a missing index is reported as
//! [`NotFoundError`] instead of faulting.

pub mod display;
pub mod error;
pub mod models;
pub mod store;

pub use error::{NotFoundError, StoreError, ValidationError};
pub use store::ListStore;
