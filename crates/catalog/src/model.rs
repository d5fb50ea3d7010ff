//! The stored catalog records: [`Book`] and [`Author`].
//!
//! Records are only produced by a [`Store`](crate::store::Store); the `New*` types carry the
//! fields needed to insert one.

/// Language code used when a search result does not list any language.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Storage identity of an [`Author`].
pub type AuthorId = i64;

/// Storage identity of a [`Book`].
pub type BookId = i64;

/// An author stored in the catalog, unique by `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    /// Identity assigned by the store.
    pub id: AuthorId,
    /// Name as given by the search API, e.g. `"Shelley, Mary Wollstonecraft"`.
    pub name: String,
    /// Year of birth, if known.
    pub birth_year: Option<i32>,
    /// Year of death, if known.
    pub death_year: Option<i32>,
}

impl Author {
    /// Whether the author was alive during `year`.
    ///
    /// Both bounds must be known and inclusive; an author missing either year is never
    /// considered alive.
    #[must_use]
    pub fn is_alive_in(&self, year: i32) -> bool {
        match (self.birth_year, self.death_year) {
            (Some(birth), Some(death)) => birth <= year && year <= death,
            _ => false,
        }
    }
}

/// The fields of an [`Author`] before it is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAuthor {
    /// Name, the natural key of an author.
    pub name: String,
    /// Year of birth, if known.
    pub birth_year: Option<i32>,
    /// Year of death, if known.
    pub death_year: Option<i32>,
}

/// A book stored in the catalog, unique by `title`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    /// Identity assigned by the store.
    pub id: BookId,
    /// Title, the natural key of a book.
    pub title: String,
    /// Short language code such as `"en"`, or [`UNKNOWN_LANGUAGE`].
    pub language: String,
    /// Download count reported by the search API at the time the book was registered.
    pub download_count: u64,
    /// The book's first listed author, if it had any.
    pub author: Option<Author>,
}

/// The fields of a [`Book`] before it is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewBook {
    pub title: String,
    pub language: String,
    pub download_count: u64,
    pub author: Option<Author>,
}
