//! The 500 page, shown when a request fails for reasons the user cannot fix,
//! such as a poisoned database lock or a misconfigured timezone.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{endpoints, html::error_view};

/// What went wrong and what the operator can do about it.
pub struct InternalServerError<'a> {
    /// A short summary shown under the status code.
    pub description: &'a str,
    /// How to recover, e.g. which server setting to check.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, your transactions could not be loaded or saved.",
            fix: "Try again in a moment. If it keeps happening, check the server logs.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

/// The handler for the standalone error page that htmx clients are redirected to.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

/// Send an htmx client to the 500 page.
///
/// Only useful as a response to an htmx request; plain page requests should
/// render [InternalServerError] directly.
pub fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}
