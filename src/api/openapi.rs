//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{authors, health},
    error::ErrorResponse,
    models::{
        author::{AuthorForm, AuthorView, DeleteAuthorForm},
        book::{BookSummaryView, BookView},
    },
    validation::FieldError,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "0.1.0",
        description = "Library catalog pages: authors and their books"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_get,
        authors::author_create_post,
        authors::author_delete_get,
        authors::author_delete_post,
        authors::author_update_get,
        authors::author_update_post,
    ),
    components(schemas(
        health::HealthResponse,
        ErrorResponse,
        AuthorForm,
        AuthorView,
        DeleteAuthorForm,
        BookSummaryView,
        BookView,
        FieldError,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "authors", description = "Author pages")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
