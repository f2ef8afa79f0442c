//! The in-memory data store backing the schema.
use crate::{
    errors::StoreError,
    model::{Author, Book},
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// The seed data the server starts with.
mod fixtures;

/// The collections themselves. Only ever accessed through the lock in [`Store`].
#[derive(Debug)]
struct Collections {
    /// All authors, in insertion order.
    authors: Vec<Author>,
    /// All books, in insertion order.
    books: Vec<Book>,
    /// The id handed to the next added book, `None` once every id has been used.
    next_book_id: Option<i32>,
}

/// A handle to the authors and books.
///
/// Cloning is cheap and every clone sees the same data. Reads share a lock while
/// [`add_book`](Self::add_book) takes it exclusively, so concurrent requests never observe a
/// half-applied mutation or hand out the same id twice.
#[derive(Debug, Clone)]
pub struct Store {
    /// The shared collections.
    inner: Arc<RwLock<Collections>>,
}

impl Store {
    /// Creates a store seeded with the given records. New book ids continue after the highest
    /// seeded one, so seeding a book with id `i32::MAX` leaves no room for new books.
    #[inline]
    #[must_use]
    pub fn new(authors: Vec<Author>, books: Vec<Book>) -> Self {
        let next_book_id = books
            .iter()
            .map(|book| book.id)
            .max()
            .unwrap_or_default()
            .checked_add(1);
        Self {
            inner: Arc::new(RwLock::new(Collections {
                authors,
                books,
                next_book_id,
            })),
        }
    }

    /// Creates a store with three authors and eight of their books.
    #[inline]
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::new(fixtures::authors(), fixtures::books())
    }

    /// Returns the book with the given id.
    #[inline]
    #[must_use]
    pub fn find_book_by_id(&self, id: i32) -> Option<Book> {
        self.inner.read().books.iter().find(|book| book.id == id).cloned()
    }

    /// Returns the author with the given id.
    #[inline]
    #[must_use]
    pub fn find_author_by_id(&self, id: i32) -> Option<Author> {
        self.inner
            .read()
            .authors
            .iter()
            .find(|author| author.id == id)
            .cloned()
    }

    /// Returns all books in insertion order.
    #[inline]
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.inner.read().books.clone()
    }

    /// Returns all authors in insertion order.
    #[inline]
    #[must_use]
    pub fn list_authors(&self) -> Vec<Author> {
        self.inner.read().authors.clone()
    }

    /// Returns the books whose author id is `author_id`, in insertion order.
    #[inline]
    #[must_use]
    pub fn books_by_author(&self, author_id: i32) -> Vec<Book> {
        self.inner
            .read()
            .books
            .iter()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect()
    }

    /// Appends a new book and returns it. `author_id` is stored as given, even if no such author
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdsExhausted`] once a book with id `i32::MAX` exists, rather than
    /// reusing an id.
    #[inline]
    pub fn add_book(&self, name: String, author_id: i32) -> Result<Book, StoreError> {
        let mut collections = self.inner.write();
        let id = collections.next_book_id.ok_or(StoreError::IdsExhausted)?;
        let book = Book {
            id,
            name,
            author_id,
        };
        collections.next_book_id = id.checked_add(1);
        collections.books.push(book.clone());
        drop(collections);

        debug!(id, author_id, "book added");
        Ok(book)
    }

    /// Echoes `id` back without removing anything.
    ///
    /// Clients of the API have always received the requested id while the book stayed listed,
    /// and this keeps doing exactly that, whether or not a book with `id` exists.
    // TODO: Decide with API consumers whether `removeBook` should actually delete the book.
    #[inline]
    #[must_use]
    pub fn remove_book_by_id(&self, id: i32) -> i32 {
        let exists = self.find_book_by_id(id).is_some();
        debug!(id, exists, "book removal requested, collection left untouched");
        id
    }
}

impl Default for Store {
    /// Creates a store without any authors or books.
    #[inline]
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
