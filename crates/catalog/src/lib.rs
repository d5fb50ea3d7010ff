#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # catalog
//!
//! catalog is a library which searches the Gutendex book-metadata API for books by title and
//! registers the first match, together with its author, in a local [`store::Store`]. Books and
//! authors are deduplicated by their natural keys, title and name.

mod acquire;
mod api;
mod error;
pub mod model;
pub mod store;

pub use acquire::Registration;
pub use api::GUTENDEX_URL;
pub use error::{Error, ErrorKind};

use log::trace;
use model::{Author, Book};
use store::Store;

type Client = reqwest::blocking::Client;

/// Searches the API at `base_url` for `query` and registers the first result in `store`.
///
/// Only the first result is considered. When its title is already stored nothing is written and
/// [`Registration::AlreadyRegistered`] is returned. The first listed author of the result is
/// reused when an author of the same name is already stored, otherwise it is saved as a new
/// author.
///
/// # Errors
///
/// An `Err` is returned when `base_url` is not a valid URL.
/// An `Err` is returned when the request fails or the response cannot be parsed; nothing is
/// written to `store` in these cases.
/// An `Err` is returned when `store` fails to read or write.
#[inline]
pub fn register_by_title<S: Store>(
    store: &S,
    base_url: &str,
    query: &str,
) -> Result<Registration, Error> {
    trace!("Register first book found for '{query}'");
    acquire::register_first_match::<Client, S>(store, base_url, query)
}

/// The stored authors alive in `year`, see [`Author::is_alive_in`].
///
/// # Errors
///
/// An `Err` is returned when `store` fails to list the authors.
pub fn authors_alive_in<S: Store>(store: &S, year: i32) -> Result<Vec<Author>, Error> {
    trace!("Search authors alive in {year}");
    let mut authors = store.list_all_authors()?;
    authors.retain(|author| author.is_alive_in(year));
    Ok(authors)
}

/// The stored books written in the language `code`, matched exactly.
///
/// # Errors
///
/// An `Err` is returned when `store` fails to list the books.
#[inline]
pub fn books_in_language<S: Store>(store: &S, code: &str) -> Result<Vec<Book>, Error> {
    trace!("Search books with language code '{code}'");
    store.list_books_by_language(code)
}

#[cfg(test)]
mod tests {
    use super::{authors_alive_in, books_in_language};
    use crate::{
        model::{NewAuthor, NewBook},
        store::{SqliteStore, Store},
    };

    fn store_with_authors() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        for (name, birth_year, death_year) in [
            ("Shelley, Mary Wollstonecraft", Some(1797), Some(1851)),
            ("Dickens, Charles", Some(1812), Some(1870)),
            ("Homer", None, None),
            ("Unknown Death", Some(1790), None),
        ] {
            store
                .save_author(NewAuthor {
                    name: name.to_owned(),
                    birth_year,
                    death_year,
                })
                .unwrap();
        }
        store
    }

    fn names_alive_in(store: &SqliteStore, year: i32) -> Vec<String> {
        authors_alive_in(store, year)
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect()
    }

    #[test]
    fn shelley_is_alive_in_1800_but_not_1900() {
        let store = store_with_authors();

        assert_eq!(vec!["Shelley, Mary Wollstonecraft"], names_alive_in(&store, 1800));
        assert!(names_alive_in(&store, 1900).is_empty());
    }

    #[test]
    fn overlapping_lifetimes_are_all_returned() {
        let store = store_with_authors();

        assert_eq!(
            vec!["Shelley, Mary Wollstonecraft", "Dickens, Charles"],
            names_alive_in(&store, 1830)
        );
    }

    #[test]
    fn authors_with_unknown_years_are_never_alive() {
        let store = store_with_authors();

        for year in [-800, 1795, 1800, 2000] {
            let names = names_alive_in(&store, year);
            assert!(!names.contains(&"Homer".to_owned()));
            assert!(!names.contains(&"Unknown Death".to_owned()));
        }
    }

    #[test]
    fn books_in_language_excludes_other_codes() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (title, language) in [("Emma", "en"), ("Candide", "fr"), ("Faust", "de")] {
            store
                .save_book(NewBook {
                    title: title.to_owned(),
                    language: language.to_owned(),
                    download_count: 0,
                    author: None,
                })
                .unwrap();
        }

        let books = books_in_language(&store, "fr").unwrap();
        assert_eq!(1, books.len());
        assert_eq!("Candide", books[0].title);
        assert!(books_in_language(&store, "FR").unwrap().is_empty());
    }
}
