pub mod api;
pub mod config;
pub mod session;

pub use todos_core::{display, models, store};
pub use todos_core::{ListStore, NotFoundError, StoreError, ValidationError};
