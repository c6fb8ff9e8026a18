use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: Uuid,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Optional short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rating from 0 to 100
    pub rating: u8,
}

/// Write payload for creating or replacing a book.
///
/// `id` stays a string and `rating` a wide integer so that bad values reach
/// validation and come back as field errors instead of decode failures.
#[derive(Debug, Clone, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rating: i64,
}

/// Read view of a book without its rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookNoRating {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Book> for BookNoRating {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
        }
    }
}

/// Form fields accepted by the login echo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Result of the seed operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedReport {
    pub inserted: usize,
}

/// Query string for the limited listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadSomeParams {
    pub books_to_return: Option<i64>,
}

/// Fixed sample records used to populate an empty store.
pub fn seed_books() -> Vec<Book> {
    [
        (0xe57d756f_4ca3_46ee_a5dc_4d81000c36f7_u128, 1, 90),
        (0x6690321d_0882_4304_b38e_0a1d816d978a_u128, 2, 95),
        (0x48a6af8e_82f9_4f11_a8d3_21f0c738f5fa_u128, 3, 100),
        (0xb75caa34_45bf_46e1_ad98_67e8396bd370_u128, 4, 75),
    ]
    .into_iter()
    .map(|(id, n, rating)| Book {
        id: Uuid::from_u128(id),
        title: format!("book{n} title"),
        author: format!("author{n}"),
        description: Some(format!("description{n}")),
        rating,
    })
    .collect()
}
