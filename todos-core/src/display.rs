//! Display ordering: incomplete items first, then complete ones.
//!
//! Both passes are stable and keep each element's storage index, because
//! requests address lists and todos by storage index rather than by the
//! position they were rendered at.

use crate::models::{Todo, TodoList};

/// Stable partition of `items` by `is_complete`, incomplete first.
fn partition_by<T>(items: &[T], is_complete: impl Fn(&T) -> bool) -> Vec<(usize, &T)> {
    let (complete, mut ordered): (Vec<_>, Vec<_>) = items
        .iter()
        .enumerate()
        .partition(|&(_, item)| is_complete(item));
    ordered.extend(complete);
    ordered
}

/// Lists in display order, paired with their storage index.
pub fn sort_lists(lists: &[TodoList]) -> Vec<(usize, &TodoList)> {
    partition_by(lists, TodoList::is_complete)
}

/// Todos in display order, paired with their index within the list.
pub fn sort_todos(todos: &[Todo]) -> Vec<(usize, &Todo)> {
    partition_by(todos, |todo| todo.completed)
}
