//! Book operations over a shared repository.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::BookError;
use super::models::{Book, BookFilter, BookPayload, BookSummary, ListQuery};
use super::repository::BookRepository;
use crate::utils::{Clock, IdGenerator, SystemClock, UuidV7Ids};

/// Validates requests and applies them to the repository. Reads share the
/// lock; every mutation holds the write lock for its whole duration.
pub struct BookService {
    store: RwLock<BookRepository>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl BookService {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(BookRepository::new()),
            ids,
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BookRepository>, BookError> {
        self.store.read().map_err(|_| BookError::StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BookRepository>, BookError> {
        self.store.write().map_err(|_| BookError::StorePoisoned)
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, BookError> {
        Ok(self.read()?.len())
    }

    pub fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let draft = payload.validate()?;
        let id = self.ids.next_id();
        let now = self.clock.now();

        let book_id = self.write()?.insert(id, draft, now)?;
        tracing::debug!(book_id = %book_id, "book created");
        Ok(book_id)
    }

    pub fn list(&self, query: &ListQuery) -> Result<Vec<BookSummary>, BookError> {
        let filter = BookFilter::from(query);
        Ok(self.read()?.list(&filter))
    }

    pub fn get(&self, book_id: &str) -> Result<Book, BookError> {
        self.read()?.get(book_id).cloned()
    }

    /// Validation runs before the lookup, so an invalid payload for an
    /// unknown id reports the validation failure.
    pub fn update(&self, book_id: &str, payload: BookPayload) -> Result<(), BookError> {
        let draft = payload.validate()?;
        let now = self.clock.now();

        self.write()?.update(book_id, draft, now)?;
        tracing::debug!(book_id = %book_id, "book updated");
        Ok(())
    }

    pub fn delete(&self, book_id: &str) -> Result<(), BookError> {
        self.write()?.remove(book_id)?;
        tracing::debug!(book_id = %book_id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
impl BookService {
    /// Leave the store lock poisoned, as a writer that panicked mid-update would.
    pub(crate) fn poison_store(&self) {
        std::thread::scope(|scope| {
            let writer = scope.spawn(|| {
                let _guard = self.store.write().unwrap();
                panic!("writer panicked while holding the book store");
            });
            assert!(writer.join().is_err());
        });
    }
}

impl Default for BookService {
    fn default() -> Self {
        Self::new(Arc::new(UuidV7Ids), Arc::new(SystemClock))
    }
}
