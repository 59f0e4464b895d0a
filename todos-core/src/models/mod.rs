//! Domain models for the todos server.
//!
//! - [`TodoList`]: a named, ordered collection of todos. Its completion is
//!   derived from its todos and never stored.
//! - [`Todo`]: a named item with a completed flag.

mod list;
mod todo;

pub use list::*;
pub use todo::*;

/// Shortest accepted list or todo name, in characters.
pub const MIN_NAME_LEN: usize = 1;
/// Longest accepted list or todo name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Whether `name` has an acceptable length for a list or todo.
pub fn name_length_valid(name: &str) -> bool {
    (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.chars().count())
}
