use bookshelf_http::AppError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use super::validation::ValidationErrors;

pub const NOT_FOUND_MESSAGE: &str = "Book not found";
pub const NOT_FOUND_HEADER: &str = "x-header-error";
pub const NOT_FOUND_HEADER_VALUE: &str = "Nothing to be seen at UUID";

/// Failures of the book operations.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("book {0} not found")]
    NotFound(Uuid),

    #[error("negative limit {0}")]
    NegativeLimit(i64),

    #[error("book {0} already exists")]
    DuplicateId(Uuid),
}

impl From<ValidationErrors> for BookError {
    fn from(errors: ValidationErrors) -> Self {
        BookError::Validation(errors)
    }
}

impl From<BookError> for AppError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::Validation(errors) => {
                let details = errors
                    .violations()
                    .iter()
                    .map(|violation| json!(violation))
                    .collect();
                AppError::validation(details, errors.to_string())
            }
            BookError::NotFound(_) => AppError::not_found(NOT_FOUND_MESSAGE)
                .with_header(NOT_FOUND_HEADER, NOT_FOUND_HEADER_VALUE),
            BookError::NegativeLimit(value) => AppError::negative_number(value),
            BookError::DuplicateId(id) => AppError::conflict(
                vec![json!({ "field": "id", "value": id })],
                format!("a book with id {} already exists", id),
            ),
        }
    }
}
