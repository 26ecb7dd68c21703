//! SQL schema for the gigbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` is a per-connection setting, so it must run on the same
/// connection that serves queries.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS venue (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    genres              TEXT    NOT NULL DEFAULT '[]',   -- JSON array of strings
    address             TEXT    NOT NULL,
    city                TEXT    NOT NULL,
    state               TEXT    NOT NULL,
    phone               TEXT    NOT NULL,
    website             TEXT,
    facebook_link       TEXT    NOT NULL,
    seeking_talent      INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT    NOT NULL DEFAULT '',
    image_link          TEXT
);

CREATE TABLE IF NOT EXISTS artist (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    genres              TEXT    NOT NULL DEFAULT '[]',
    city                TEXT    NOT NULL,
    state               TEXT    NOT NULL,
    phone               TEXT    NOT NULL,
    website             TEXT,
    facebook_link       TEXT    NOT NULL,
    image_link          TEXT,
    seeking_venue       INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT    NOT NULL DEFAULT ''
);

-- No ON DELETE action: deleting a venue or artist that still has shows is
-- rejected.
CREATE TABLE IF NOT EXISTS show (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    venue_id  INTEGER NOT NULL REFERENCES venue(id),
    artist_id INTEGER NOT NULL REFERENCES artist(id),
    date      TEXT    NOT NULL   -- RFC 3339 UTC, fixed microsecond precision
);

CREATE INDEX IF NOT EXISTS show_venue_idx  ON show(venue_id);
CREATE INDEX IF NOT EXISTS show_artist_idx ON show(artist_id);
CREATE INDEX IF NOT EXISTS show_date_idx   ON show(date);

PRAGMA user_version = 1;
";

/// Name of the scalar function registered by [`register_functions`].
pub const FOLD_CASE: &str = "fold_case";

/// Register connection-local SQL functions.
///
/// SQLite's built-in `lower()` and `LIKE` only fold ASCII letters; name
/// search compares `fold_case(name)` against a pattern lowered in Rust so
/// that "órbita" finds "Café Órbita".
pub fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  use rusqlite::functions::FunctionFlags;

  conn.create_scalar_function(
    FOLD_CASE,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let value: Option<String> = ctx.get(0)?;
      Ok(value.map(|s| s.to_lowercase()))
    },
  )
}
