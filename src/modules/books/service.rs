use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::BookError;
use super::models::{seed_books, Book, BookInput, BookNoRating};
use super::store::BookStore;
use super::validation::{ValidationErrors, ValidationRules};

/// Book operations over a shared, lock-guarded store.
///
/// Cloning the service clones the handle, not the records. Every operation
/// holds the lock for its whole scan-and-mutate step.
#[derive(Debug, Clone)]
pub struct BookService {
    store: Arc<RwLock<BookStore>>,
    rules: ValidationRules,
}

impl BookService {
    pub fn new(rules: ValidationRules) -> Self {
        Self::with_store(BookStore::new(), rules)
    }

    pub fn with_store(store: BookStore, rules: ValidationRules) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            rules,
        }
    }

    pub fn rules(&self) -> ValidationRules {
        self.rules
    }

    /// Insert the fixed sample records if the store is empty.
    ///
    /// Returns how many records were inserted; zero when the store already
    /// held anything.
    pub async fn seed(&self) -> usize {
        let mut store = self.store.write().await;
        if !store.is_empty() {
            tracing::debug!(count = store.len(), "store not empty, skipping seed");
            return 0;
        }

        let books = seed_books();
        let inserted = books.len();
        for book in books {
            store.append(book);
        }
        tracing::info!(count = inserted, "seeded book store");
        inserted
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn list_all(&self) -> Vec<Book> {
        self.store.read().await.list_all().to_vec()
    }

    /// Return the first `limit` records in insertion order.
    ///
    /// A negative limit is refused outright; `None` returns everything.
    pub async fn list_some(&self, limit: Option<i64>) -> Result<Vec<Book>, BookError> {
        let Some(limit) = limit else {
            return Ok(self.list_all().await);
        };
        if limit < 0 {
            return Err(BookError::NegativeLimit(limit));
        }

        let store = self.store.read().await;
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(store.list_all().iter().take(take).cloned().collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Book, BookError> {
        self.store
            .read()
            .await
            .find_by_id(id)
            .cloned()
            .ok_or(BookError::NotFound(id))
    }

    pub async fn get_no_rating(&self, id: Uuid) -> Result<BookNoRating, BookError> {
        self.store
            .read()
            .await
            .find_by_id(id)
            .map(BookNoRating::from)
            .ok_or(BookError::NotFound(id))
    }

    /// Validate and append a new record. A missing id is generated.
    pub async fn create(&self, input: BookInput) -> Result<Book, BookError> {
        let book = self.rules.build(input, Uuid::new_v4())?;

        let mut store = self.store.write().await;
        if store.contains(book.id) {
            return Err(BookError::DuplicateId(book.id));
        }
        store.append(book.clone());

        tracing::info!(book_id = %book.id, count = store.len(), "book created");
        Ok(book)
    }

    /// Fully replace the record with `id`. The stored id never changes.
    pub async fn replace(&self, id: Uuid, input: BookInput) -> Result<Book, BookError> {
        let book = self.rules.build(input, id)?;
        if book.id != id {
            return Err(ValidationErrors::single(
                "id",
                "path_mismatch",
                format!("body id {} does not match path id {}", book.id, id),
            )
            .into());
        }

        let mut store = self.store.write().await;
        let stored = store
            .replace_at(id, book)
            .cloned()
            .ok_or(BookError::NotFound(id))?;

        tracing::info!(book_id = %id, "book replaced");
        Ok(stored)
    }

    /// Remove the record with `id`, returning the confirmation message.
    pub async fn delete(&self, id: Uuid) -> Result<String, BookError> {
        let mut store = self.store.write().await;
        store.delete(id).ok_or(BookError::NotFound(id))?;

        tracing::info!(book_id = %id, count = store.len(), "book deleted");
        Ok(format!("ID: {} deleted.", id))
    }
}

impl Default for BookService {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}
