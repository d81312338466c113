//! Derived display helpers shared by the catalog models

use chrono::NaiveDate;

/// Route prefix every canonical entity URL lives under
pub const ROUTE_PREFIX: &str = "/catalog";

/// Placeholder rendered for a date that is not set
pub const INVALID_DATE: &str = "Invalid DateTime";

/// Kind of catalog entity, used to build canonical URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Book,
    BookInstance,
    Genre,
}

impl EntityKind {
    pub fn segment(self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Book => "book",
            EntityKind::BookInstance => "bookinstance",
            EntityKind::Genre => "genre",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segment())
    }
}

/// Canonical detail path of an entity, e.g. `/catalog/author/42`
pub fn canonical_url(kind: EntityKind, id: i32) -> String {
    format!("{}/{}/{}", ROUTE_PREFIX, kind, id)
}

/// Medium-style date ("May 1, 1980"), or [`INVALID_DATE`] when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => medium_date(date),
        None => INVALID_DATE.to_string(),
    }
}

pub(crate) fn medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
