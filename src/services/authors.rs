//! Author pages: list, detail, create, delete, update

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        display::ROUTE_PREFIX, Author, AuthorForm, AuthorView, Book, BookSummaryView, BookView,
    },
    repository::{CatalogStore, SortOrder},
    validation::validate_author_form,
    views::{Page, View, ViewContext},
};

const LIST_TEMPLATE: &str = "author_list";
const DETAIL_TEMPLATE: &str = "author_detail";
const FORM_TEMPLATE: &str = "author_form";
const DELETE_TEMPLATE: &str = "author_delete";

const CREATE_TITLE: &str = "Create Author";
const DELETE_TITLE: &str = "Delete Author";

/// Path of the author list page
pub fn author_list_url() -> String {
    format!("{}/authors", ROUTE_PREFIX)
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All authors, ordered by family name
    pub async fn list(&self) -> AppResult<Page> {
        let authors = self.store.authors_find(SortOrder::Ascending).await?;
        Ok(Page::Render(View::new(
            LIST_TEMPLATE,
            "Author List",
            ViewContext::AuthorList {
                author_list: authors.iter().map(AuthorView::from).collect(),
            },
        )))
    }

    /// Author with the title and summary of each of its books
    pub async fn detail(&self, id: i32) -> AppResult<Page> {
        let (author, books) = tokio::try_join!(
            self.store.author_find_by_id(id),
            self.store.book_summaries_find_by_author(id),
        )?;

        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        Ok(Page::Render(View::new(
            DETAIL_TEMPLATE,
            "Author Detail",
            ViewContext::AuthorDetail {
                author: AuthorView::from(&author),
                author_books: books.iter().map(BookSummaryView::from).collect(),
            },
        )))
    }

    /// Empty creation form
    pub fn create_form(&self) -> Page {
        Page::Render(View::new(
            FORM_TEMPLATE,
            CREATE_TITLE,
            ViewContext::AuthorForm {
                author: None,
                errors: Vec::new(),
            },
        ))
    }

    /// Validate and save a submitted author.
    ///
    /// A rejected form is shown again with the values as submitted; an
    /// accepted one redirects to the new author's page.
    pub async fn create(&self, form: AuthorForm) -> AppResult<Page> {
        let draft = match validate_author_form(&form) {
            Ok(draft) => draft,
            Err(rejected) => {
                tracing::debug!("Author form rejected with {} error(s)", rejected.errors.len());
                return Ok(Page::Render(View::new(
                    FORM_TEMPLATE,
                    CREATE_TITLE,
                    ViewContext::AuthorForm {
                        author: Some(rejected.submitted),
                        errors: rejected.errors,
                    },
                )));
            }
        };

        let author = self.store.author_save(&draft).await?;
        tracing::info!("Created author id={} ({})", author.id, author.full_name());
        Ok(Page::Redirect(author.url()))
    }

    /// Delete confirmation page. An unknown author sends the client back to
    /// the list.
    pub async fn delete_form(&self, id: i32) -> AppResult<Page> {
        let (author, books) = self.author_with_books(id).await?;
        match author {
            None => Ok(Page::Redirect(author_list_url())),
            Some(author) => Ok(delete_page(&author, &books)),
        }
    }

    /// Delete an author that no book references. Otherwise the confirmation
    /// page is shown again and nothing is removed.
    pub async fn delete(&self, id: i32) -> AppResult<Page> {
        let (author, books) = self.author_with_books(id).await?;

        let Some(author) = author else {
            tracing::debug!("Author {} already gone, nothing to delete", id);
            return Ok(Page::Redirect(author_list_url()));
        };

        if !books.is_empty() {
            tracing::info!(
                "Refusing to delete author id={}: {} book(s) still reference it",
                id,
                books.len()
            );
            return Ok(delete_page(&author, &books));
        }

        match self.store.author_delete_by_id(id).await {
            Ok(()) => {
                tracing::info!("Deleted author id={} ({})", id, author.full_name());
                Ok(Page::Redirect(author_list_url()))
            }
            Err(AppError::NotFound(_)) => {
                tracing::debug!("Author {} removed concurrently", id);
                Ok(Page::Redirect(author_list_url()))
            }
            // a book was added after the check
            Err(AppError::Validation(reason)) => {
                tracing::info!("Refusing to delete author id={}: {}", id, reason);
                match self.author_with_books(id).await? {
                    (Some(author), books) if !books.is_empty() => Ok(delete_page(&author, &books)),
                    _ => Err(AppError::Validation(reason)),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Author updates are not available yet
    pub fn update_form(&self, _id: i32) -> Page {
        Page::Text("NOT IMPLEMENTED: Author update GET")
    }

    pub fn update(&self, _id: i32) -> Page {
        Page::Text("NOT IMPLEMENTED: Author update POST")
    }

    async fn author_with_books(&self, id: i32) -> AppResult<(Option<Author>, Vec<Book>)> {
        tokio::try_join!(
            self.store.author_find_by_id(id),
            self.store.books_find_by_author(id),
        )
    }
}

fn delete_page(author: &Author, books: &[Book]) -> Page {
    Page::Render(View::new(
        DELETE_TEMPLATE,
        DELETE_TITLE,
        ViewContext::AuthorDelete {
            author: AuthorView::from(author),
            author_books: books.iter().map(BookView::from).collect(),
        },
    ))
}
