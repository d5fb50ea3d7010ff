use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
};

use catalog::{
    model::{Author, Book},
    store::Store,
    Registration,
};

use eyre::WrapErr;
use log::trace;

use crate::interact::Console;

pub const INVALID_INPUT: &str = "Invalid input.";

/// The menu options, numbered as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Register,
    ListBooks,
    ListAuthors,
    AuthorsAlive,
    BooksByLanguage,
    Exit,
}

impl Command {
    pub const MENU: [(u8, &'static str); 6] = [
        (1, "Search book by title"),
        (2, "List registered books"),
        (3, "List registered authors"),
        (4, "List authors alive in a given year"),
        (5, "List books by language"),
        (0, "Exit"),
    ];

    /// Runs the command against `store`, using `base_url` as the search endpoint.
    ///
    /// Only [`Command::Register`] writes to the store.
    pub fn execute<S, R, W>(
        self,
        console: &mut Console<R, W>,
        store: &S,
        base_url: &str,
    ) -> eyre::Result<()>
    where
        S: Store,
        R: BufRead,
        W: Write,
    {
        trace!("Executing {self:?}");
        match self {
            Command::Register => register(console, store, base_url),
            Command::ListBooks => list_books(console, store),
            Command::ListAuthors => list_authors(console, store),
            Command::AuthorsAlive => authors_alive(console, store),
            Command::BooksByLanguage => books_by_language(console, store),
            Command::Exit => Ok(console.say("\nThank you for using LiterAlura.")?),
        }
    }
}

/// Why a menu choice could not be turned into a [`Command`].
#[derive(Debug, PartialEq, Eq)]
pub enum ChoiceError {
    NotANumber,
    UnknownOption(i64),
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceError::NotANumber => f.write_str(INVALID_INPUT),
            ChoiceError::UnknownOption(n) => write!(f, "Invalid option: {n}."),
        }
    }
}

impl std::error::Error for ChoiceError {}

impl FromStr for Command {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(1) => Ok(Command::Register),
            Ok(2) => Ok(Command::ListBooks),
            Ok(3) => Ok(Command::ListAuthors),
            Ok(4) => Ok(Command::AuthorsAlive),
            Ok(5) => Ok(Command::BooksByLanguage),
            Ok(0) => Ok(Command::Exit),
            Ok(n) => Err(ChoiceError::UnknownOption(n)),
            Err(_) => Err(ChoiceError::NotANumber),
        }
    }
}

fn register<S, R, W>(console: &mut Console<R, W>, store: &S, base_url: &str) -> eyre::Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let Some(query) = console.user_input("Enter the book title: ")? else {
        return Ok(());
    };

    let registration = catalog::register_by_title(store, base_url, &query)
        .wrap_err_with(|| format!("Search for '{query}' failed"))?;

    match registration {
        Registration::Registered(book) => console.say(format!("Book saved: {}", book.title))?,
        Registration::AlreadyRegistered(title) => {
            console.say(format!("The book '{title}' is already registered."))?;
        }
        Registration::NotFound => console.say("Book not found.")?,
    }
    Ok(())
}

fn list_books<S, R, W>(console: &mut Console<R, W>, store: &S) -> eyre::Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let books = store.list_all_books()?;
    if books.is_empty() {
        console.say("No books registered.")?;
        return Ok(());
    }

    console.say("\nBooks in the catalog:")?;
    for book in &books {
        console.say(BookDetails(book))?;
    }
    Ok(())
}

fn list_authors<S, R, W>(console: &mut Console<R, W>, store: &S) -> eyre::Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let authors = store.list_all_authors()?;
    if authors.is_empty() {
        console.say("No authors registered.")?;
        return Ok(());
    }

    console.say("\nRegistered authors:")?;
    for author in &authors {
        let books = store.books_by_author(author.id)?;
        console.say(AuthorDetails(author, &books))?;
    }
    Ok(())
}

fn authors_alive<S, R, W>(console: &mut Console<R, W>, store: &S) -> eyre::Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let Some(input) = console.user_input("Enter a year to list the authors alive in it: ")? else {
        return Ok(());
    };
    let Ok(year) = input.trim().parse::<i32>() else {
        console.say(INVALID_INPUT)?;
        return Ok(());
    };

    let authors = catalog::authors_alive_in(store, year)?;
    if authors.is_empty() {
        console.say("No authors found alive in that year.")?;
    }
    for author in authors {
        console.say(format!("Author alive in {year}: {}", author.name))?;
    }
    Ok(())
}

fn books_by_language<S, R, W>(console: &mut Console<R, W>, store: &S) -> eyre::Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let Some(code) = console.user_input("Enter the language code (e.g. 'en', 'es', 'fr'): ")?
    else {
        return Ok(());
    };

    let books = catalog::books_in_language(store, &code)?;
    if books.is_empty() {
        console.say("No books found in that language.")?;
        return Ok(());
    }

    console.say(format!("\nBooks in language '{code}':"))?;
    for book in books {
        console.say(format!("- {}", book.title))?;
    }
    Ok(())
}

struct BookDetails<'a>(&'a Book);

impl fmt::Display for BookDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Book {
            title,
            language,
            download_count,
            author,
            ..
        } = self.0;

        writeln!(f, "Title: {title}")?;
        writeln!(f, "Language: {language}")?;
        writeln!(f, "Downloads: {download_count}")?;
        writeln!(
            f,
            "Author: {}",
            author.as_ref().map_or("Unknown", |a| a.name.as_str())
        )?;
        f.write_str("--------------------------------")
    }
}

struct AuthorDetails<'a>(&'a Author, &'a [Book]);

impl fmt::Display for AuthorDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn year(year: Option<i32>) -> String {
            year.map_or_else(|| "unknown".to_owned(), |y| y.to_string())
        }

        let AuthorDetails(author, books) = self;
        let titles = books
            .iter()
            .map(|b| b.title.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        writeln!(f, "Name: {}", author.name)?;
        writeln!(f, "Born: {}", year(author.birth_year))?;
        writeln!(f, "Died: {}", year(author.death_year))?;
        writeln!(f, "Books: [{titles}]")?;
        f.write_str("--------------------------------")
    }
}
