use uuid::Uuid;

use super::models::Book;

/// Insertion-ordered collection of book records.
///
/// Lookups are linear scans and act on the first record with a matching id.
/// Not synchronized; see `BookService` for the lock that guards it.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Overwrite the record with `id` in place. Returns the stored record, or
    /// `None` if no record has that id.
    pub fn replace_at(&mut self, id: Uuid, book: Book) -> Option<&Book> {
        let slot = self.books.iter_mut().find(|existing| existing.id == id)?;
        *slot = book;
        Some(slot)
    }

    /// Remove the first record with `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: Uuid) -> Option<Book> {
        let position = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(position))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
