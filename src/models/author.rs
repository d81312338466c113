//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::display::{canonical_url, format_date, medium_date, EntityKind};

/// Author as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "{family_name}, {first_name}", separator kept even for empty parts
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        canonical_url(EntityKind::Author, self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    /// "{birth} - {death}". Unlike the `*_formatted` fields, a missing date
    /// leaves its side empty instead of printing the invalid-date placeholder.
    pub fn lifespan(&self) -> String {
        let mut lifespan = String::new();
        if let Some(born) = self.date_of_birth {
            lifespan.push_str(&medium_date(born));
        }
        lifespan.push_str(" - ");
        if let Some(died) = self.date_of_death {
            lifespan.push_str(&medium_date(died));
        }
        lifespan
    }
}

/// Author with its derived display fields, as handed to views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub full_name: String,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub lifespan: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            full_name: author.full_name(),
            url: author.url(),
            date_of_birth_formatted: author.date_of_birth_formatted(),
            date_of_death_formatted: author.date_of_death_formatted(),
            lifespan: author.lifespan(),
        }
    }
}

/// Sanitized author draft ready to be saved
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Family name must be 1 to 100 characters"))]
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Raw author form fields exactly as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// Author delete form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeleteAuthorForm {
    pub authorid: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(dob: Option<NaiveDate>, dod: Option<NaiveDate>) -> Author {
        Author {
            id: 3,
            first_name: "Mary".to_string(),
            family_name: "Shelley".to_string(),
            date_of_birth: dob,
            date_of_death: dod,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(author(None, None).full_name(), "Shelley, Mary");
    }

    #[test]
    fn test_full_name_keeps_separator_for_empty_parts() {
        let mut a = author(None, None);
        a.first_name.clear();
        assert_eq!(a.full_name(), "Shelley, ");
        a.family_name.clear();
        assert_eq!(a.full_name(), ", ");
    }

    #[test]
    fn test_url() {
        assert_eq!(author(None, None).url(), "/catalog/author/3");
    }

    #[test]
    fn test_lifespan_and_formatted_dates_diverge_on_missing_dates() {
        let born = NaiveDate::from_ymd_opt(1980, 5, 1);
        let a = author(born, None);
        assert_eq!(a.lifespan(), "May 1, 1980 - ");
        assert_eq!(a.date_of_birth_formatted(), "May 1, 1980");
        assert_eq!(a.date_of_death_formatted(), "Invalid DateTime");

        let a = author(None, NaiveDate::from_ymd_opt(1851, 2, 1));
        assert_eq!(a.lifespan(), " - Feb 1, 1851");
        assert_eq!(a.date_of_birth_formatted(), "Invalid DateTime");
        assert_eq!(a.date_of_death_formatted(), "Feb 1, 1851");

        let a = author(None, None);
        assert_eq!(a.lifespan(), " - ");
    }

    #[test]
    fn test_lifespan_both_dates() {
        let a = author(
            NaiveDate::from_ymd_opt(1797, 8, 30),
            NaiveDate::from_ymd_opt(1851, 2, 1),
        );
        assert_eq!(a.lifespan(), "Aug 30, 1797 - Feb 1, 1851");
    }

    #[test]
    fn test_view_carries_derived_fields() {
        let a = author(NaiveDate::from_ymd_opt(1980, 5, 1), None);
        let view = AuthorView::from(&a);
        assert_eq!(view.full_name, "Shelley, Mary");
        assert_eq!(view.url, "/catalog/author/3");
        assert_eq!(view.lifespan, "May 1, 1980 - ");
    }

    #[test]
    fn test_create_author_schema_limits() {
        let draft = CreateAuthor {
            first_name: "a".repeat(101),
            family_name: "Austen".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(draft.validate().is_err());

        let draft = CreateAuthor {
            first_name: "Jane".to_string(),
            ..draft
        };
        assert!(draft.validate().is_ok());
    }
}
