//! JSON view models returned by the read endpoints.
//!
//! Lists and todos appear in display order (incomplete first) but every
//! entry carries its storage `id`, which is what the mutating endpoints
//! expect in their paths.

use serde::{Deserialize, Serialize};

use crate::display::{sort_lists, sort_todos};
use crate::models::{Todo, TodoList};
use crate::session::Flash;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: usize,
    pub name: String,
    pub complete: bool,
    pub todos_count: usize,
    pub todos_remaining: usize,
}

impl ListSummary {
    pub fn new(id: usize, list: &TodoList) -> Self {
        Self {
            id,
            name: list.name.clone(),
            complete: list.is_complete(),
            todos_count: list.todos_count(),
            todos_remaining: list.todos_remaining_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoView {
    pub id: usize,
    pub name: String,
    pub completed: bool,
}

impl TodoView {
    pub fn new(id: usize, todo: &Todo) -> Self {
        Self {
            id,
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

/// A single list with its todos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub summary: ListSummary,
    pub todos: Vec<TodoView>,
}

impl ListDetail {
    pub fn new(id: usize, list: &TodoList) -> Self {
        Self {
            summary: ListSummary::new(id, list),
            todos: sort_todos(&list.todos)
                .into_iter()
                .map(|(id, todo)| TodoView::new(id, todo))
                .collect(),
        }
    }
}

/// Response for `GET /lists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsPage {
    pub flash: Option<Flash>,
    pub lists: Vec<ListSummary>,
}

impl ListsPage {
    pub fn new(flash: Option<Flash>, lists: &[TodoList]) -> Self {
        Self {
            flash,
            lists: sort_lists(lists)
                .into_iter()
                .map(|(id, list)| ListSummary::new(id, list))
                .collect(),
        }
    }
}

/// Response for `GET /lists/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    pub flash: Option<Flash>,
    pub list: ListDetail,
}

/// Where a list name form submits to, and what it is pre-filled with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListForm {
    pub action: String,
    pub method: String,
    pub list_name: Option<String>,
}

/// Response for `GET /lists/new` and `GET /lists/{id}/edit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage {
    pub flash: Option<Flash>,
    pub form: ListForm,
}

impl FormPage {
    pub fn new_list(flash: Option<Flash>) -> Self {
        Self {
            flash,
            form: ListForm {
                action: "/lists".to_string(),
                method: "post".to_string(),
                list_name: None,
            },
        }
    }

    pub fn edit_list(flash: Option<Flash>, id: usize, list: &TodoList) -> Self {
        Self {
            flash,
            form: ListForm {
                action: format!("/lists/{id}"),
                method: "post".to_string(),
                list_name: Some(list.name.clone()),
            },
        }
    }
}
