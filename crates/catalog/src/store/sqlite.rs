use std::path::Path;

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{
    model::{Author, AuthorId, Book, NewAuthor, NewBook},
    Error,
};

use super::{migrations, Store};

const BOOK_SELECT_SQL: &str = "SELECT
    b.id,
    b.title,
    b.language,
    b.download_count,
    a.id,
    a.name,
    a.birth_year,
    a.death_year
FROM books b
LEFT JOIN authors a ON a.id = b.author_id";

const AUTHOR_SELECT_SQL: &str = "SELECT id, name, birth_year, death_year FROM authors";

/// A [`Store`] backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path` and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the file cannot be opened as a SQLite database or when its
    /// schema is newer than this build supports.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        info!("Opening catalog database at '{}'", path.display());
        Connection::open(path)
            .map_err(Error::from)
            .and_then(Self::bootstrap)
    }

    /// Opens a private in-memory database with an up to date schema.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, Error> {
        debug!("Opening in-memory catalog database");
        Connection::open_in_memory()
            .map_err(Error::from)
            .and_then(Self::bootstrap)
    }

    fn bootstrap(mut conn: Connection) -> Result<Self, Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    fn query_books<P: rusqlite::Params>(&self, filter: &str, params: P) -> Result<Vec<Book>, Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} {filter} ORDER BY b.id;"))?;
        let books = stmt
            .query_map(params, parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }
}

impl Store for SqliteStore {
    fn book_exists_by_title(&self, title: &str) -> Result<bool, Error> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM books WHERE title = ?1);",
            params![title],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn save_book(&self, book: NewBook) -> Result<Book, Error> {
        let NewBook {
            title,
            language,
            download_count,
            author,
        } = book;

        self.conn.execute(
            "INSERT INTO books (title, language, download_count, author_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                title,
                language,
                download_count,
                author.as_ref().map(|a| a.id)
            ],
        )?;

        Ok(Book {
            id: self.conn.last_insert_rowid(),
            title,
            language,
            download_count,
            author,
        })
    }

    fn list_all_books(&self) -> Result<Vec<Book>, Error> {
        self.query_books("", [])
    }

    fn list_books_by_language(&self, code: &str) -> Result<Vec<Book>, Error> {
        self.query_books("WHERE b.language = ?1", params![code])
    }

    fn books_by_author(&self, author: AuthorId) -> Result<Vec<Book>, Error> {
        self.query_books("WHERE b.author_id = ?1", params![author])
    }

    fn author_exists_by_name(&self, name: &str) -> Result<bool, Error> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE name = ?1);",
            params![name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, Error> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"),
                params![name],
                parse_author_row,
            )
            .optional()?;
        Ok(author)
    }

    fn save_author(&self, author: NewAuthor) -> Result<Author, Error> {
        let NewAuthor {
            name,
            birth_year,
            death_year,
        } = author;

        self.conn.execute(
            "INSERT INTO authors (name, birth_year, death_year) VALUES (?1, ?2, ?3);",
            params![name, birth_year, death_year],
        )?;

        Ok(Author {
            id: self.conn.last_insert_rowid(),
            name,
            birth_year,
            death_year,
        })
    }

    fn list_all_authors(&self) -> Result<Vec<Author>, Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id;"))?;
        let authors = stmt
            .query_map([], parse_author_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(authors)
    }
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        birth_year: row.get(2)?,
        death_year: row.get(3)?,
    })
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    // columns 4.. come from the LEFT JOIN and are all NULL for a book without author
    let author = match row.get::<_, Option<AuthorId>>(4)? {
        Some(id) => Some(Author {
            id,
            name: row.get(5)?,
            birth_year: row.get(6)?,
            death_year: row.get(7)?,
        }),
        None => None,
    };

    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        language: row.get(2)?,
        download_count: row.get(3)?,
        author,
    })
}
