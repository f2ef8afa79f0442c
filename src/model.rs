//! The records held by the [`Store`] and the relations between them.
use crate::store::Store;
use async_graphql::{ComplexObject, Context, Result, SimpleObject};

/// Book data
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Book {
    /// The identifier of the book.
    pub id: i32,
    /// The title of the book.
    pub name: String,
    /// The identifier of the author. Nothing checks that such an author exists.
    // Exposed as `authorID` while the mutation argument is `authorId`. Clients depend on both.
    #[graphql(name = "authorID")]
    pub author_id: i32,
}

#[ComplexObject]
impl Book {
    /// The author of the book, if one with a matching id exists.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        Ok(ctx.data::<Store>()?.find_author_by_id(self.author_id))
    }
}

/// Author of the book
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(complex, name = "AuthorType")]
pub struct Author {
    /// The identifier of the author.
    pub id: i32,
    /// The name of the author.
    pub name: String,
}

#[ComplexObject]
impl Author {
    /// The books written by the author, in the order they were added.
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        Ok(ctx.data::<Store>()?.books_by_author(self.id))
    }
}
