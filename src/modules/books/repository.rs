//! Ordered in-memory collection of book records.

use time::OffsetDateTime;

use super::error::BookError;
use super::models::{Book, BookDraft, BookFilter, BookSummary};

/// Owns every book record; insertion order is listing order.
#[derive(Debug, Default)]
pub struct BookRepository {
    books: Vec<Book>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Append a new record and return its id.
    pub fn insert(
        &mut self,
        id: String,
        draft: BookDraft,
        now: OffsetDateTime,
    ) -> Result<String, BookError> {
        self.books.push(Book::new(id.clone(), draft, now));

        if !self.contains(&id) {
            return Err(BookError::InternalInconsistency(id));
        }
        Ok(id)
    }

    /// Summaries of the records matching `filter`, in insertion order.
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Book, BookError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    pub fn update(
        &mut self,
        id: &str,
        draft: BookDraft,
        now: OffsetDateTime,
    ) -> Result<&Book, BookError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        book.apply(draft, now);
        Ok(&*book)
    }

    /// Remove a record, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Result<Book, BookError> {
        let index = self
            .position(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        Ok(self.books.remove(index))
    }
}
