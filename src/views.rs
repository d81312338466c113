//! Page outcomes handed to the rendering layer
//!
//! Templates are rendered outside this crate. A rendered view is delivered
//! as JSON carrying the template name, the page title and its context.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::{
    models::{AuthorForm, AuthorView, BookSummaryView, BookView},
    validation::FieldError,
};

/// Outcome of a workflow operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Render a named template
    Render(View),
    /// Send the client elsewhere; nothing else is written
    Redirect(String),
    /// Plain-text body
    Text(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub template: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub context: ViewContext,
}

/// Data each template receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewContext {
    AuthorList {
        author_list: Vec<AuthorView>,
    },
    AuthorDetail {
        author: AuthorView,
        author_books: Vec<BookSummaryView>,
    },
    AuthorForm {
        #[serde(skip_serializing_if = "Option::is_none")]
        author: Option<AuthorForm>,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        author: AuthorView,
        author_books: Vec<BookView>,
    },
}

impl View {
    pub fn new(template: &'static str, title: &'static str, context: ViewContext) -> Self {
        Self {
            template,
            title,
            context,
        }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => (StatusCode::OK, Json(view)).into_response(),
            Page::Redirect(location) => Redirect::to(&location).into_response(),
            Page::Text(body) => (StatusCode::OK, body).into_response(),
        }
    }
}
