//! Author form validation and sanitization
//!
//! Every field is checked independently and all failures are collected, in
//! field order. Within a field the first failing rule wins, so a field never
//! reports more than one error.

use chrono::{NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::author::{AuthorForm, CreateAuthor};

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

// ISO-8601 date shapes, extended or basic
static CALENDAR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$").unwrap());
static CALENDAR_DATE_BASIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap());
static WEEK_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-?W(\d{2})(?:-?([1-7]))?$").unwrap());
static ORDINAL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-?(\d{3})$").unwrap());
static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?:[01]\d|2[0-3])(?::?[0-5]\d(?::?[0-5]\d(?:[.,]\d+)?)?)?|24:?00)",
        r"(?:[zZ]|[+-](?:[01]\d|2[0-3])(?::?[0-5]\d)?)?$",
    ))
    .unwrap()
});

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors for a rejected form, along with the values as submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedForm {
    pub errors: Vec<FieldError>,
    pub submitted: AuthorForm,
}

/// Validate a submitted author form into a sanitized draft.
pub fn validate_author_form(form: &AuthorForm) -> Result<CreateAuthor, RejectedForm> {
    let mut errors = Vec::new();

    let first_name = collect(
        &mut errors,
        "first_name",
        sanitize_name(&form.first_name, "First name"),
    );
    let family_name = collect(
        &mut errors,
        "family_name",
        sanitize_name(&form.family_name, "Family name"),
    );
    let date_of_birth = collect(
        &mut errors,
        "date_of_birth",
        optional_date(form.date_of_birth.as_deref(), "Invalid date of birth"),
    );
    let date_of_death = collect(
        &mut errors,
        "date_of_death",
        optional_date(form.date_of_death.as_deref(), "Invalid date of death"),
    );

    match (first_name, family_name, date_of_birth, date_of_death) {
        (Some(first_name), Some(family_name), Some(date_of_birth), Some(date_of_death))
            if errors.is_empty() =>
        {
            Ok(CreateAuthor {
                first_name,
                family_name,
                date_of_birth,
                date_of_death,
            })
        }
        _ => Err(RejectedForm {
            errors,
            submitted: form.clone(),
        }),
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// trim -> required -> escape -> alphanumeric
fn sanitize_name(raw: &str, label: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} must be specified", label));
    }
    let escaped = escape_markup(trimmed);
    if !ALPHANUMERIC.is_match(&escaped) {
        return Err(format!("{} has non-alphanumeric characters", label));
    }
    Ok(escaped)
}

/// Absent or empty values are skipped; anything else must be an ISO-8601 date.
fn optional_date(raw: Option<&str>, message: &str) -> Result<Option<NaiveDate>, String> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_iso_date(value)
            .map(Some)
            .ok_or_else(|| message.to_string()),
    }
}

/// Parse an ISO-8601 date: calendar (`1980`, `1980-05`, `1980-05-01`,
/// `19800501`), week (`1980-W18-4`) or ordinal (`1980-122`), optionally
/// followed by a time of day and offset. Missing month or day default to 1.
/// The calendar day is taken as written; the time part is only checked.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let (date, time) = match value.split_once(|c: char| c == 'T' || c == ' ') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };
    if let Some(time) = time {
        if !TIME_OF_DAY.is_match(time) {
            return None;
        }
    }

    if let Some(caps) = CALENDAR_DATE.captures(date) {
        // a time of day needs a complete date
        if time.is_some() && caps.get(3).is_none() {
            return None;
        }
        let year = caps[1].parse().ok()?;
        let month = caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?;
        let day = caps.get(3).map_or(Some(1), |d| d.as_str().parse().ok())?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Some(caps) = CALENDAR_DATE_BASIC.captures(date) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }
    if let Some(caps) = WEEK_DATE.captures(date) {
        let weekday = caps.get(3).map_or(Some(1), |d| d.as_str().parse::<usize>().ok())?;
        return NaiveDate::from_isoywd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            *WEEKDAYS.get(weekday.checked_sub(1)?)?,
        );
    }
    if let Some(caps) = ORDINAL_DATE.captures(date) {
        return NaiveDate::from_yo_opt(caps[1].parse().ok()?, caps[2].parse().ok()?);
    }
    None
}

/// Replace markup-significant characters with HTML entities.
pub fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}
