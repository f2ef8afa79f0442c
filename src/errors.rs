//! Error types returned by the store.

use thiserror::Error;

/// Errors that may occur when adding a book. Created by
/// [`Store::add_book`](crate::store::Store::add_book).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// Every id up to `i32::MAX` has been handed out.
    #[error("No book ids left, {} is already taken.", i32::MAX)]
    IdsExhausted,
}
