//! The per-session collection of lists and the operations that mutate it.

use serde::{Deserialize, Serialize};

use crate::error::{NotFoundError, Result, StoreError, ValidationError};
use crate::models::{name_length_valid, Todo, TodoList};

/// All lists belonging to one session, in storage order.
///
/// Storage order is what indices address. Display order is computed
/// separately by [`crate::display`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListStore {
    lists: Vec<TodoList>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, index: usize) -> Result<&TodoList, NotFoundError> {
        self.lists.get(index).ok_or_else(|| NotFoundError::list(index))
    }

    fn list_mut(&mut self, index: usize) -> Result<&mut TodoList, NotFoundError> {
        self.lists
            .get_mut(index)
            .ok_or_else(|| NotFoundError::list(index))
    }

    pub fn todo(&self, list_index: usize, todo_index: usize) -> Result<&Todo, NotFoundError> {
        self.list(list_index)?
            .todos
            .get(todo_index)
            .ok_or_else(|| NotFoundError::todo(todo_index))
    }

    fn todo_mut(
        &mut self,
        list_index: usize,
        todo_index: usize,
    ) -> Result<&mut Todo, NotFoundError> {
        self.list_mut(list_index)?
            .todos
            .get_mut(todo_index)
            .ok_or_else(|| NotFoundError::todo(todo_index))
    }

    /// Validate a list name against every list except `exclude`.
    fn check_list_name(&self, name: &str, exclude: Option<usize>) -> Result<(), ValidationError> {
        if !name_length_valid(name) {
            return Err(ValidationError::ListNameLength);
        }

        let taken = self
            .lists
            .iter()
            .enumerate()
            .any(|(index, list)| Some(index) != exclude && list.name == name);
        if taken {
            return Err(ValidationError::ListNameTaken);
        }

        Ok(())
    }

    /// Append a new, empty list.
    pub fn create_list(&mut self, name: &str) -> Result<(), ValidationError> {
        self.check_list_name(name, None)?;
        self.lists.push(TodoList::new(name));
        tracing::debug!(index = self.lists.len() - 1, name, "list created");
        Ok(())
    }

    /// Rename the list at `index`.
    ///
    /// The list's own current name does not count as a clash, so renaming a
    /// list to the name it already has succeeds.
    pub fn rename_list(&mut self, index: usize, name: &str) -> Result<()> {
        self.list(index)?;
        self.check_list_name(name, Some(index))?;
        self.list_mut(index)?.name = name.to_string();
        Ok(())
    }

    /// Remove the list at `index` along with its todos. Later lists move down
    /// one position.
    pub fn delete_list(&mut self, index: usize) -> Result<(), NotFoundError> {
        self.list(index)?;
        let removed = self.lists.remove(index);
        tracing::debug!(index, name = %removed.name, "list deleted");
        Ok(())
    }

    /// Append an incomplete todo to the list at `list_index`.
    pub fn add_todo(&mut self, list_index: usize, name: &str) -> Result<()> {
        let list = self.list_mut(list_index)?;
        if !name_length_valid(name) {
            return Err(StoreError::Validation(ValidationError::TodoNameLength));
        }
        list.todos.push(Todo::new(name));
        Ok(())
    }

    /// Remove a todo. Later todos in the same list move down one position.
    pub fn delete_todo(&mut self, list_index: usize, todo_index: usize) -> Result<(), NotFoundError> {
        self.todo(list_index, todo_index)?;
        self.list_mut(list_index)?.todos.remove(todo_index);
        Ok(())
    }

    pub fn set_todo_completed(
        &mut self,
        list_index: usize,
        todo_index: usize,
        completed: bool,
    ) -> Result<(), NotFoundError> {
        self.todo_mut(list_index, todo_index)?.completed = completed;
        Ok(())
    }

    /// Mark every todo on the list completed. A list without todos is left
    /// as is.
    pub fn complete_all(&mut self, list_index: usize) -> Result<(), NotFoundError> {
        for todo in &mut self.list_mut(list_index)?.todos {
            todo.completed = true;
        }
        Ok(())
    }
}
