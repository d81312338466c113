//! Author page endpoints

use axum::{
    extract::{Path, State},
    Form,
};

use crate::{
    error::AppResult,
    models::author::{AuthorForm, DeleteAuthorForm},
    views::Page,
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list view")
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<Page> {
    state.services.authors.list().await
}

/// Show one author and its books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Page> {
    state.services.authors.detail(id).await
}

/// Empty author creation form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form view")
    )
)]
pub async fn author_create_get(State(state): State<AppState>) -> Page {
    state.services.authors.create_form()
}

/// Submit a new author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form shown again with errors"),
        (status = 303, description = "Author created, redirect to its page")
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Page> {
    state.services.authors.create(form).await
}

/// Author delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation view"),
        (status = 303, description = "Unknown author, redirect to the list")
    )
)]
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Page> {
    state.services.authors.delete_form(id).await
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body(content = DeleteAuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Author still has books, confirmation shown again"),
        (status = 303, description = "Author deleted, redirect to the list")
    )
)]
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Page> {
    // the form's author id wins over the path
    let author_id = form.authorid.unwrap_or(id);
    state.services.authors.delete(author_id).await
}

/// Author update form (not implemented)
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Placeholder text")
    )
)]
pub async fn author_update_get(State(state): State<AppState>, Path(id): Path<i32>) -> Page {
    state.services.authors.update_form(id)
}

/// Author update submission (not implemented)
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Placeholder text")
    )
)]
pub async fn author_update_post(State(state): State<AppState>, Path(id): Path<i32>) -> Page {
    state.services.authors.update(id)
}
