use serde::{Deserialize, Serialize};

use super::Todo;

/// A named to-do list.
///
/// Lists are identified by their index in the owning
/// [`ListStore`](crate::ListStore); deleting a list shifts the indices of
/// every list after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete when it has at least one todo and none remain.
    /// An empty list is never complete.
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(name: &str, completed: bool) -> Todo {
        Todo {
            name: name.to_string(),
            completed,
        }
    }

    #[test]
    fn empty_list_is_not_complete() {
        assert!(!TodoList::new("Empty").is_complete());
    }

    #[test]
    fn list_with_remaining_todo_is_not_complete() {
        let list = TodoList {
            name: "Chores".to_string(),
            todos: vec![todo("Dishes", true), todo("Laundry", false)],
        };

        assert!(!list.is_complete());
        assert_eq!(list.todos_count(), 2);
        assert_eq!(list.todos_remaining_count(), 1);
    }

    #[test]
    fn list_with_all_todos_completed_is_complete() {
        let list = TodoList {
            name: "Chores".to_string(),
            todos: vec![todo("Dishes", true), todo("Laundry", true)],
        };

        assert!(list.is_complete());
        assert_eq!(list.todos_remaining_count(), 0);
    }
}
