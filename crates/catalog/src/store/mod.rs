//! Persistence of the catalog: the [`Store`] accessors and the SQLite backed [`SqliteStore`].

mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::{
    model::{Author, AuthorId, Book, NewAuthor, NewBook},
    Error,
};

/// Accessors over the two catalog collections, books and authors.
///
/// Natural keys (book title, author name) are matched exactly and case-sensitively. Listing
/// methods return records in a stable order.
pub trait Store {
    /// Whether a book with exactly this title is stored.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn book_exists_by_title(&self, title: &str) -> Result<bool, Error>;

    /// Stores a new book and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails, including when a book with the
    /// same title is already stored.
    fn save_book(&self, book: NewBook) -> Result<Book, Error>;

    /// All stored books.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn list_all_books(&self) -> Result<Vec<Book>, Error>;

    /// The stored books whose language code equals `code`.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn list_books_by_language(&self, code: &str) -> Result<Vec<Book>, Error>;

    /// The stored books that reference the author with identity `author`.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn books_by_author(&self, author: AuthorId) -> Result<Vec<Book>, Error>;

    /// Whether an author with exactly this name is stored.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn author_exists_by_name(&self, name: &str) -> Result<bool, Error>;

    /// Looks up an author by name.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, Error>;

    /// Stores a new author and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails, including when an author with the
    /// same name is already stored.
    fn save_author(&self, author: NewAuthor) -> Result<Author, Error>;

    /// All stored authors.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the underlying storage fails.
    fn list_all_authors(&self) -> Result<Vec<Author>, Error>;
}
