//! Alerts are short notifications swapped into the page's alert container
//! after an htmx request, or rendered inline for notices carried across a redirect.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A notification telling the user the outcome of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action succeeded.
    SuccessSimple { message: String },
    /// An action failed, with details on what went wrong or how to fix it.
    Error { message: String, details: String },
    /// An action failed.
    ErrorSimple { message: String },
}

const SUCCESS_STYLE: &str = "flex items-start p-4 mb-4 text-green-800 \
    border-t-4 border-green-300 bg-green-50 dark:text-green-400 \
    dark:bg-gray-800 dark:border-green-800 rounded shadow";

const ERROR_STYLE: &str = "flex items-start p-4 mb-4 text-red-800 \
    border-t-4 border-red-300 bg-red-50 dark:text-red-400 \
    dark:bg-gray-800 dark:border-red-800 rounded shadow";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/#border-accent
        html! {
            div role="alert" class=(style)
            {
                div class="ms-3 text-sm"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex items-center
                        justify-center h-8 w-8 hover:bg-black/5 dark:hover:bg-white/5"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}
