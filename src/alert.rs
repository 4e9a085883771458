//! Alert fragments for displaying error messages to users.
//!
//! Endpoints called via HTMX return these fragments with an error status so
//! that the response-targets extension swaps them into the page's alert
//! container instead of the action's normal target.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message rendered into the page's alert container.
#[derive(Debug)]
pub struct Alert {
    status_code: StatusCode,
    message: String,
    details: String,
}

impl Alert {
    /// Create an error alert with a short message and a longer explanation.
    pub fn error(status_code: StatusCode, message: &str, details: &str) -> Self {
        Self {
            status_code,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    fn into_html(self) -> Markup {
        html! {
            div
                class="flex items-start gap-3 p-4 mb-4 rounded border \
                    border-red-300 bg-red-50 text-red-800 dark:border-red-800 \
                    dark:bg-gray-800 dark:text-red-400"
                role="alert"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="font-bold cursor-pointer"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status_code = self.status_code;

        (status_code, self.into_html()).into_response()
    }
}
