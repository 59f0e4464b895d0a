//! Session middleware: resolves the session cookie to a [`SessionHandle`].

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::session::{SessionHandle, SessionStore};

/// Attach the caller's session to the request, starting one if needed.
///
/// Handlers receive the session as `Extension<SessionHandle>`. A newly
/// started session is registered and announced to the client with a
/// `Set-Cookie` header only once the request has stored something in it.
pub async fn session_middleware(
    State(sessions): State<SessionStore>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let cookie_name = sessions.config().cookie_name.clone();
    let id = extract_session_id(request.headers(), &cookie_name);
    let loaded = sessions.load_or_create(id);

    request
        .extensions_mut()
        .insert::<SessionHandle>(loaded.handle.clone());

    let mut response = next.run(request).await;

    if loaded.created && sessions.persist(&loaded) {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, loaded.id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie header: {}", e),
        }
    }

    response
}

/// Find the session id in the request's `Cookie` headers.
fn extract_session_id(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}
