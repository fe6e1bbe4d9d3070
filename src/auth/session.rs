//! The authenticated user context for a request.

use axum::{extract::FromRequestParts, http::request::Parts, response::Response};

use crate::{Error, auth::UserID};

/// The signed-in user, placed in the request extensions by the auth guards.
///
/// Handlers take a `Session` argument instead of reading the cookie
/// themselves. A route that is reached without passing through an auth
/// guard rejects the request with a "Not authenticated" alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The user every query made by the handler is scoped to.
    pub user_id: UserID,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Session>() {
            Some(session) => Ok(*session),
            None => {
                tracing::warn!(
                    "No session for request to {}, rejecting as not authenticated.",
                    parts.uri.path()
                );
                Err(Error::NotAuthenticated.into_alert_response())
            }
        }
    }
}
