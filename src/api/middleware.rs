//! Session resolution middleware.
//!
//! Each request reads the session provider exactly once and carries that
//! snapshot in its extensions, so every decision made while serving it sees
//! the same session.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use super::AppState;
use crate::models::Session;
use crate::provider::SessionProvider;

/// The session snapshot for the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub session: Session,
}

/// Resolve `Authorization: Bearer <token>` into a [`CurrentSession`].
///
/// A missing or malformed header is not an error: the viewer is simply signed
/// out and the route guard decides what they see.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = bearer_token(&request);
    let session = state.sessions.session(token.as_deref());

    request.extensions_mut().insert(CurrentSession { token, session });
    next.run(request).await
}

fn bearer_token(request: &Request<Body>) -> Option<String> {
    let header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
        _ => {
            tracing::warn!("Invalid Authorization header format");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&request_with(Some("Bearer abc"))),
            Some("abc".to_string())
        );
    }

    #[test]
    fn ignores_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&request_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request_with(Some("Bearer  "))), None);
        assert_eq!(bearer_token(&request_with(None)), None);
    }
}
