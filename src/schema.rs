//! The root query and mutation types, and the construction of the schema around a [`Store`].
use crate::{
    model::{Author, Book},
    store::Store,
};
use async_graphql::{EmptySubscription, Object, Result, Schema, SimpleObject};

/// The complete schema type, named to keep signatures readable.
pub type BookshelfSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builds the schema. This is the only place a [`Store`] gets attached to it, which the
/// relation fields on [`Book`] and [`Author`] rely on.
#[inline]
#[must_use]
pub fn build_schema(store: Store) -> BookshelfSchema {
    Schema::build(
        Query {
            store: store.clone(),
        },
        Mutation {
            store: store.clone(),
        },
        EmptySubscription,
    )
    .data(store)
    .finish()
}

/// What remains of a book after asking for its removal.
#[derive(SimpleObject, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovedBook {
    /// The id the removal was requested for.
    pub id: i32,
}

/// The root query type.
#[derive(Debug)]
pub struct Query {
    /// The store to read from.
    store: Store,
}

/// Root query
#[Object]
impl Query {
    /// Dedicated book
    async fn book(&self, id: Option<i32>) -> Option<Book> {
        id.and_then(|id| self.store.find_book_by_id(id))
    }

    /// Lists of books
    async fn books(&self) -> Vec<Book> {
        self.store.list_books()
    }

    /// Lists of Authors of the books
    async fn authors(&self) -> Vec<Author> {
        self.store.list_authors()
    }

    /// A single Author
    async fn author(&self, id: i32) -> Option<Author> {
        self.store.find_author_by_id(id)
    }
}

/// The root mutation type.
#[derive(Debug)]
pub struct Mutation {
    /// The store to write to.
    store: Store,
}

#[Object]
impl Mutation {
    /// Adds a book. The author id is not checked against the known authors.
    async fn add_book(&self, author_id: i32, name: String) -> Result<Book> {
        Ok(self.store.add_book(name, author_id)?)
    }

    /// Requests the removal of a book. The book is left in place and only its id is returned.
    async fn remove_book(&self, id: i32) -> RemovedBook {
        RemovedBook {
            id: self.store.remove_book_by_id(id),
        }
    }
}
