//! Registry of loaded books.
//!
//! The registry is an explicit value owned by the caller; nothing in the
//! crate keeps a process-wide book list. Query engines borrow a registry (or
//! a snapshot of a [`SharedBookRegistry`]) for the duration of one query.

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};
use parking_lot::RwLock;

use crate::book::book::{Book, BookId};
use crate::error::{HelpdexError, Result};

/// Books keyed by id, iterated in registration order.
#[derive(Debug, Default, Clone)]
pub struct BookRegistry {
    by_id: AHashMap<BookId, Arc<Book>>,
    order: Vec<Arc<Book>>,
}

impl BookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book.
    ///
    /// Fails with [`HelpdexError::DuplicateBookId`] if a book with the same
    /// id is registered; the existing book is left untouched. Unregister it
    /// first to replace it.
    pub fn register(&mut self, book: Book) -> Result<Arc<Book>> {
        self.register_shared(Arc::new(book))
    }

    /// Add a book that is already shared.
    pub fn register_shared(&mut self, book: Arc<Book>) -> Result<Arc<Book>> {
        if self.by_id.contains_key(book.id()) {
            return Err(HelpdexError::duplicate_book(book.id()));
        }

        info!(
            "registered book {} ({} toc entries, {} index keys)",
            book.id(),
            book.toc().node_count(),
            book.index().key_count()
        );
        self.by_id.insert(book.id().to_string(), Arc::clone(&book));
        self.order.push(Arc::clone(&book));
        Ok(book)
    }

    /// Remove a book. Removing an absent id is a no-op.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<Book>> {
        let removed = self.by_id.remove(id)?;
        self.order.retain(|book| !Arc::ptr_eq(book, &removed));
        debug!("unregistered book {id}");
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Book>> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Every book in registration order.
    ///
    /// The iterator is lazy and finite; calling `all` again (or cloning the
    /// iterator) starts over from the first registered book.
    pub fn all(&self) -> std::slice::Iter<'_, Arc<Book>> {
        self.order.iter()
    }

    /// Book ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|book| book.id())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A registry shared between a loading task and concurrent queries.
///
/// Registration takes the write lock briefly; queries take a
/// [`snapshot`](SharedBookRegistry::snapshot) and run without holding any
/// lock, so a book that is still loading is simply not visible yet.
#[derive(Debug, Default, Clone)]
pub struct SharedBookRegistry {
    inner: Arc<RwLock<BookRegistry>>,
}

impl SharedBookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, book: Book) -> Result<Arc<Book>> {
        self.inner.write().register(book)
    }

    pub fn unregister(&self, id: &str) -> Option<Arc<Book>> {
        self.inner.write().unregister(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Point-in-time copy of the registry. Books are shared, not cloned.
    pub fn snapshot(&self) -> BookRegistry {
        self.inner.read().clone()
    }
}
