use axum::{
    extract::{rejection::FormRejection, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;

use crate::api::views::*;
use crate::session::{Session, SessionHandle};
use crate::{NotFoundError, StoreError};

const LISTS_PATH: &str = "/lists";

// ============================================================
// Request Helpers
// ============================================================

/// Form body carrying a list name.
#[derive(Debug, Default, Deserialize)]
pub struct ListNameInput {
    #[serde(default)]
    pub list_name: String,
}

/// Form body carrying a todo name.
#[derive(Debug, Default, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub todo: String,
}

/// Form body for toggling a todo. Only the literal `"true"` marks it done.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteTodoInput {
    #[serde(default)]
    pub completed: String,
}

/// Parse a list id from the path. Anything that is not a plain index is
/// reported the same way as an index past the end.
fn list_index(raw: &str) -> Result<usize, NotFoundError> {
    raw.parse().map_err(|_| NotFoundError::list(raw))
}

fn todo_index(raw: &str) -> Result<usize, NotFoundError> {
    raw.parse().map_err(|_| NotFoundError::todo(raw))
}

fn list_path(index: usize) -> String {
    format!("{LISTS_PATH}/{index}")
}

/// Requests sent by the page script instead of a plain form submission.
fn is_xhr(headers: &HeaderMap) -> bool {
    headers
        .get("X-Requested-With")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Send the client to `path`: a redirect for forms, or the path as a
/// `200` body for script requests, which navigate themselves.
fn navigate(xhr: bool, path: &str) -> Response {
    if xhr {
        (StatusCode::OK, path.to_string()).into_response()
    } else {
        Redirect::to(path).into_response()
    }
}

/// Use the submitted form, or an empty one when the body is missing or not
/// form encoded. Empty fields then fail validation like any other bad input.
fn form_or_default<T: Default>(input: Result<Form<T>, FormRejection>) -> T {
    match input {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::debug!("Treating unreadable form as empty: {}", rejection);
            T::default()
        }
    }
}

/// Record a missing list or todo as the pending error message.
fn flash_not_found(session: &mut Session, err: NotFoundError) {
    tracing::warn!("Not found: {}", err);
    session.flash_error(err.to_string());
}

/// Record a missing list or todo and send the user back to all lists.
fn not_found(session: &mut Session, err: NotFoundError) -> Redirect {
    flash_not_found(session, err);
    Redirect::to(LISTS_PATH)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn index() -> Redirect {
    Redirect::to(LISTS_PATH)
}

// ============================================================
// Lists
// ============================================================

pub async fn list_lists(Extension(session): Extension<SessionHandle>) -> Json<ListsPage> {
    session.with(|session| {
        let flash = session.take_flash();
        Json(ListsPage::new(flash, session.lists.lists()))
    })
}

pub async fn new_list_form(Extension(session): Extension<SessionHandle>) -> Json<FormPage> {
    session.with(|session| Json(FormPage::new_list(session.take_flash())))
}

pub async fn create_list(
    Extension(session): Extension<SessionHandle>,
    input: Result<Form<ListNameInput>, FormRejection>,
) -> Redirect {
    let input = form_or_default(input);
    let name = input.list_name.trim();

    session.with(|session| match session.lists.create_list(name) {
        Ok(()) => {
            tracing::info!("Created list {:?}", name);
            session.flash_success("The list has been created.");
            Redirect::to(LISTS_PATH)
        }
        Err(err) => {
            tracing::warn!("Validation error: {}", err);
            session.flash_error(err.to_string());
            Redirect::to(&format!("{LISTS_PATH}/new"))
        }
    })
}

pub async fn get_list(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<String>,
) -> Result<Json<ListPage>, Redirect> {
    session.with(|session| {
        let found = list_index(&id).and_then(|index| {
            session
                .lists
                .list(index)
                .map(|list| ListDetail::new(index, list))
        });

        match found {
            Ok(list) => Ok(Json(ListPage {
                flash: session.take_flash(),
                list,
            })),
            Err(err) => Err(not_found(session, err)),
        }
    })
}

pub async fn edit_list_form(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<String>,
) -> Result<Json<FormPage>, Redirect> {
    session.with(|session| {
        let found = list_index(&id).and_then(|index| {
            session
                .lists
                .list(index)
                .map(|list| FormPage::edit_list(None, index, list))
        });

        match found {
            Ok(mut page) => {
                page.flash = session.take_flash();
                Ok(Json(page))
            }
            Err(err) => Err(not_found(session, err)),
        }
    })
}

pub async fn update_list(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<String>,
    input: Result<Form<ListNameInput>, FormRejection>,
) -> Redirect {
    let input = form_or_default(input);
    let name = input.list_name.trim();

    session.with(|session| {
        let index = match list_index(&id) {
            Ok(index) => index,
            Err(err) => return not_found(session, err),
        };

        match session.lists.rename_list(index, name) {
            Ok(()) => {
                tracing::info!("Renamed list {} to {:?}", index, name);
                session.flash_success("The list has been updated.");
                Redirect::to(&list_path(index))
            }
            Err(StoreError::NotFound(err)) => not_found(session, err),
            Err(StoreError::Validation(err)) => {
                tracing::warn!("Validation error: {}", err);
                session.flash_error(err.to_string());
                Redirect::to(&format!("{}/edit", list_path(index)))
            }
        }
    })
}

pub async fn delete_list(
    Extension(session): Extension<SessionHandle>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let xhr = is_xhr(&headers);

    session.with(|session| {
        let deleted = list_index(&id).and_then(|index| session.lists.delete_list(index));

        match deleted {
            Ok(()) => {
                tracing::info!("Deleted list {}", id);
                session.flash_success("The list has been deleted.");
            }
            Err(err) => flash_not_found(session, err),
        }

        navigate(xhr, LISTS_PATH)
    })
}

// ============================================================
// Todos
// ============================================================

pub async fn create_todo(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<String>,
    input: Result<Form<TodoInput>, FormRejection>,
) -> Redirect {
    let input = form_or_default(input);
    let name = input.todo.trim();

    session.with(|session| {
        let index = match list_index(&id) {
            Ok(index) => index,
            Err(err) => return not_found(session, err),
        };

        match session.lists.add_todo(index, name) {
            Ok(()) => {
                tracing::info!("Added todo {:?} to list {}", name, index);
                session.flash_success("The todo has been added.");
            }
            Err(StoreError::NotFound(err)) => return not_found(session, err),
            Err(StoreError::Validation(err)) => {
                tracing::warn!("Validation error: {}", err);
                session.flash_error(err.to_string());
            }
        }

        Redirect::to(&list_path(index))
    })
}

pub async fn delete_todo(
    Extension(session): Extension<SessionHandle>,
    headers: HeaderMap,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> Response {
    let xhr = is_xhr(&headers);

    session.with(|session| {
        let indices = list_index(&list_id).and_then(|list| Ok((list, todo_index(&todo_id)?)));
        let deleted = indices.and_then(|(list, todo)| {
            session.lists.delete_todo(list, todo)?;
            Ok(list)
        });

        match deleted {
            Ok(list) => {
                tracing::info!("Deleted todo {} from list {}", todo_id, list);
                if xhr {
                    // The page removes the item itself; nothing to navigate to.
                    StatusCode::NO_CONTENT.into_response()
                } else {
                    session.flash_success("The todo has been deleted.");
                    Redirect::to(&list_path(list)).into_response()
                }
            }
            Err(err) => {
                flash_not_found(session, err);
                navigate(xhr, LISTS_PATH)
            }
        }
    })
}

pub async fn update_todo(
    Extension(session): Extension<SessionHandle>,
    Path((list_id, todo_id)): Path<(String, String)>,
    input: Result<Form<CompleteTodoInput>, FormRejection>,
) -> Redirect {
    let completed = form_or_default(input).completed == "true";

    session.with(|session| {
        let updated = list_index(&list_id).and_then(|list| {
            let todo = todo_index(&todo_id)?;
            session.lists.set_todo_completed(list, todo, completed)?;
            Ok(list)
        });

        match updated {
            Ok(list) => {
                tracing::info!(
                    "Set todo {} in list {} completed={}",
                    todo_id,
                    list,
                    completed
                );
                session.flash_success("The todo has been updated.");
                Redirect::to(&list_path(list))
            }
            Err(err) => not_found(session, err),
        }
    })
}

pub async fn complete_all_todos(
    Extension(session): Extension<SessionHandle>,
    Path(id): Path<String>,
) -> Redirect {
    session.with(|session| {
        let completed = list_index(&id).and_then(|index| {
            session.lists.complete_all(index)?;
            Ok(index)
        });

        match completed {
            Ok(index) => {
                tracing::info!("Completed all todos in list {}", index);
                session.flash_success("All todos have been completed.");
                Redirect::to(&list_path(index))
            }
            Err(err) => not_found(session, err),
        }
    })
}
