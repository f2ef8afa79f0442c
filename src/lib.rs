//! An in-memory catalogue of books and authors, exposed as a GraphQL schema.
//!
//! The [`Store`](store::Store) owns the data, the [`model`] types describe it and
//! [`build_schema`](schema::build_schema) binds both to the root query and mutation types. The
//! HTTP side lives in the `bookshelf-server` crate.

pub mod errors;
pub use errors::StoreError;

pub mod model;
pub use model::{Author, Book};

pub mod store;
pub use store::Store;

pub mod schema;
pub use schema::{BookshelfSchema, build_schema};
