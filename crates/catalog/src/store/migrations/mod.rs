//! Schema migrations, tracked with `PRAGMA user_version`.

use log::info;
use rusqlite::Connection;

use crate::{Error, ErrorKind};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// The latest schema version known by this build.
pub(crate) fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every pending migration inside a single transaction.
pub(crate) fn apply_migrations(conn: &mut Connection) -> Result<(), Error> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(Error::new(
            ErrorKind::Storage,
            format!("database schema version {current} is newer than supported {latest}"),
        ));
    }

    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!("Database schema migrated from version {current} to {latest}");
    Ok(())
}

pub(crate) fn current_version(conn: &Connection) -> Result<u32, Error> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
