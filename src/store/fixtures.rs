use crate::model::{Author, Book};

/// The authors every fresh store knows about.
pub(super) fn authors() -> Vec<Author> {
    [(1, "J. K. Rowling"), (2, "J. R. R. Tolkien"), (3, "Brent Weeks")]
        .into_iter()
        .map(|(id, name)| Author {
            id,
            name: name.to_owned(),
        })
        .collect()
}

/// The books every fresh store starts with.
pub(super) fn books() -> Vec<Book> {
    [
        (1, "Harry Potter and the Chamber of Secrets", 1),
        (2, "Harry Potter and the Prisoner of Azkaban", 1),
        (3, "Harry Potter and the Goblet of Fire", 1),
        (4, "The Fellowship of the Ring", 2),
        (5, "The Two Towers", 2),
        (6, "The Return of the King", 2),
        (7, "The Way of Shadows", 3),
        (8, "Beyond the Shadows", 3),
    ]
    .into_iter()
    .map(|(id, name, author_id)| Book {
        id,
        name: name.to_owned(),
        author_id,
    })
    .collect()
}
