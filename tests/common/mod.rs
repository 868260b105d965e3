//! Shared test infrastructure for model and editor tests.
//!
//! Provides a temporary SQLite database with the schema applied, plus a
//! small layout skeleton carrying all four substitution placeholders.

use rusqlite::Connection;
use tempfile::TempDir;

use mailforge::db::MIGRATIONS;

pub const TEST_LAYOUT: &str = "<html><h1>{{maintitle}}</h1><h2>{{title}}</h2>\
{{content}}{{#each images}}{{/each}}</html>";

/// Setup a test database with the schema applied.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}
