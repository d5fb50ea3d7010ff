use std::io::{BufRead, Write};

use catalog::store::Store;
use log::{info, trace, warn};

use crate::{commands::Command, interact::Console};

/// The menu loop: owns the store and runs one command per menu choice until the user exits.
pub struct App<S> {
    store: S,
    base_url: String,
}

impl<S: Store> App<S> {
    pub const fn new(store: S, base_url: String) -> Self {
        Self { store, base_url }
    }

    /// Shows the menu and executes the chosen command until [`Command::Exit`] is chosen or the
    /// input ends.
    ///
    /// A failing command is reported and the menu is shown again; only failing to read from or
    /// write to the console stops the loop with an `Err`.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> eyre::Result<()> {
        info!("Using search endpoint '{}'", self.base_url);

        loop {
            show_menu(console)?;
            let Some(choice) = console.user_input("\nSelect an option: ")? else {
                trace!("No more input - exiting");
                return Ok(());
            };

            let command = match choice.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    console.say(format!("\n{err}"))?;
                    continue;
                }
            };

            if let Err(err) = command.execute(console, &self.store, &self.base_url) {
                warn!("{command:?} failed: {err:#}");
                console.say(format!("Operation failed: {err:#}"))?;
            }

            if command == Command::Exit {
                return Ok(());
            }
        }
    }
}

fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> std::io::Result<()> {
    console.say("\n======= LITERALURA MENU =======")?;
    for (number, label) in Command::MENU {
        console.say(format!("{number}. {label}"))?;
    }
    console.say("-------------------------------")
}
