#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{io, path::PathBuf, process};

mod app;
mod commands;
mod interact;

use app::App;
use interact::Console;

use catalog::store::SqliteStore;

use clap::Parser;
use eyre::WrapErr;
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        database,
        base_url,
        verbosity,
        quiet,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    trace!("Opening catalog database '{}'", database.display());
    let store = SqliteStore::open(&database)
        .wrap_err_with(|| format!("Cannot open the catalog database '{}'", database.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    App::new(store, base_url).run(&mut console)
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "literalura")]
#[clap(about = "Search the Gutendex catalog and keep a local register of books and authors")]
#[clap(version, author)]
struct Cli {
    /// The SQLite database file holding the registered books and authors
    #[clap(
        short,
        long,
        parse(from_os_str),
        env = "LITERALURA_DATABASE",
        default_value = "literalura.db"
    )]
    database: PathBuf,

    /// The book search endpoint, queried with a `search` parameter
    #[clap(long, env = "LITERALURA_BASE_URL", default_value = catalog::GUTENDEX_URL)]
    base_url: String,

    /// How chatty the program is on stderr
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only log errors to stderr, the menu itself is still shown.
    #[clap(short, long)]
    quiet: bool,
}
