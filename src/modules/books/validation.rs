//! Field rules applied to book payloads before they reach the store.

use std::fmt;

use bookshelf_kernel::settings::BooksSettings;
use serde::Serialize;
use uuid::Uuid;

use super::models::{Book, BookInput};

pub const AUTHOR_MAX_LEN: usize = 100;
pub const RATING_MIN: i64 = 0;
pub const RATING_MAX: i64 = 100;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub constraint: &'static str,
    pub message: String,
}

/// Every violation found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, constraint: &'static str, message: String) {
        self.0.push(FieldViolation {
            field,
            constraint,
            message,
        });
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub(crate) fn single(field: &'static str, constraint: &'static str, message: String) -> Self {
        let mut errors = Self::default();
        errors.push(field, constraint, message);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Length and range limits for book fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub description_max_len: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            description_max_len: 100,
        }
    }
}

impl From<&BooksSettings> for ValidationRules {
    fn from(settings: &BooksSettings) -> Self {
        Self {
            description_max_len: settings.description_max_len,
        }
    }
}

/// Typed values of the fields that need parsing, produced by a passing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedFields {
    pub id: Option<Uuid>,
    pub rating: u8,
}

impl ValidationRules {
    /// Check every field, collecting all violations.
    pub fn validate(&self, input: &BookInput) -> Result<CheckedFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let id = match input.id.as_deref().map(|raw| (raw, Uuid::parse_str(raw))) {
            Some((_, Ok(id))) => Some(id),
            Some((raw, Err(_))) => {
                errors.push("id", "uuid", format!("'{}' is not a valid UUID", raw));
                None
            }
            None => None,
        };

        if input.title.chars().count() < 1 {
            errors.push("title", "min_length", "title must not be empty".to_string());
        }

        let author_len = input.author.chars().count();
        if author_len < 1 {
            errors.push("author", "min_length", "author must not be empty".to_string());
        } else if author_len > AUTHOR_MAX_LEN {
            errors.push(
                "author",
                "max_length",
                format!("author must be at most {} characters", AUTHOR_MAX_LEN),
            );
        }

        if let Some(description) = &input.description {
            let len = description.chars().count();
            if len < 1 {
                errors.push(
                    "description",
                    "min_length",
                    "description must not be empty when present".to_string(),
                );
            } else if len > self.description_max_len {
                errors.push(
                    "description",
                    "max_length",
                    format!(
                        "description must be at most {} characters",
                        self.description_max_len
                    ),
                );
            }
        }

        let rating = u8::try_from(input.rating)
            .ok()
            .filter(|rating| (RATING_MIN..=RATING_MAX).contains(&i64::from(*rating)));
        if rating.is_none() {
            errors.push(
                "rating",
                "range",
                format!(
                    "rating must be between {} and {}, got {}",
                    RATING_MIN, RATING_MAX, input.rating
                ),
            );
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok(CheckedFields { id, rating }),
            _ => Err(errors),
        }
    }

    /// Validate and convert into a stored record, using `fallback_id` when the
    /// payload carries no id.
    pub fn build(&self, input: BookInput, fallback_id: Uuid) -> Result<Book, ValidationErrors> {
        let CheckedFields { id, rating } = self.validate(&input)?;
        let id = id.unwrap_or(fallback_id);

        Ok(Book {
            id,
            title: input.title,
            author: input.author,
            description: input.description,
            rating,
        })
    }
}
