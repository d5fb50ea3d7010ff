use log::{debug, info, trace};

use crate::{
    api::{
        gutendex::{self, AuthorRecord, BookRecord},
        Client,
    },
    model::{Author, Book, NewAuthor, NewBook, UNKNOWN_LANGUAGE},
    store::Store,
    Error, ErrorKind,
};

/// The outcome of searching for a book and registering it in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The first search result was stored as a new book.
    Registered(Book),
    /// A book with the first result's title is already stored; nothing was written.
    AlreadyRegistered(String),
    /// The search returned no results; nothing was written.
    NotFound,
}

/// Searches for `query` and stores the first result, reusing an already stored author of the same
/// name.
///
/// Only the first search result and its first listed author are considered. The author and book
/// are written by two separate inserts, so a failure to save the book leaves the newly saved
/// author in place.
pub(crate) fn register_first_match<C: Client, S: Store>(
    store: &S,
    base_url: &str,
    query: &str,
) -> Result<Registration, Error> {
    let Some(record) = gutendex::search::<C>(base_url, query)?.into_iter().next() else {
        info!("No results found for '{query}'");
        return Ok(Registration::NotFound);
    };

    if store.book_exists_by_title(&record.title)? {
        info!("'{}' is already registered", record.title);
        return Ok(Registration::AlreadyRegistered(record.title));
    }

    let download_count = record.download_count().unwrap_or_default();
    let BookRecord {
        title,
        authors,
        languages,
        ..
    } = record;

    // an author entry without a name is treated as no author at all
    let author = authors
        .into_iter()
        .next()
        .and_then(|author| {
            let name = author.name.clone()?;
            Some(resolve_author(store, name, &author))
        })
        .transpose()?;

    let book = NewBook {
        title,
        language: languages
            .into_iter()
            .next()
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned()),
        download_count,
        author,
    };

    let book = store.save_book(book)?;
    info!("Registered '{}'", book.title);
    Ok(Registration::Registered(book))
}

/// Returns the stored author called `name`, saving a new one from `record` if there is none.
///
/// A stored author is never updated: years found in later search results are ignored.
fn resolve_author<S: Store>(
    store: &S,
    name: String,
    record: &AuthorRecord,
) -> Result<Author, Error> {
    if store.author_exists_by_name(&name)? {
        debug!("Reusing stored author '{name}'");
        return store.find_author_by_name(&name)?.ok_or_else(|| {
            Error::new(
                ErrorKind::NoValue,
                format!("Author '{name}' disappeared from the store"),
            )
        });
    }

    let author = NewAuthor {
        name,
        birth_year: record.birth_year(),
        death_year: record.death_year(),
    };
    trace!("Saving new author {author:?}");
    store.save_author(author)
}
