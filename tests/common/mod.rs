#![allow(dead_code)]

use std::error::Error;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rowbind::sqlite::Connection;
use tracing_subscriber::EnvFilter;

pub type TestResult = Result<(), Box<dyn Error>>;

const SCHEMA: &str = "
CREATE TABLE book (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    author       TEXT NOT NULL,
    price        REAL NOT NULL,
    published_at TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn setup_db() -> Result<Connection, Box<dyn Error>> {
    init_tracing();

    let conn = Connection::open_memory()?;
    conn.exec(SCHEMA)?;
    Ok(conn)
}

pub fn episode_title(i: usize) -> String {
    format!("Game of Thresholds - Episode {}", i + 1)
}

pub fn episode_price(i: usize) -> f64 {
    (i + 1) as f64 * 10.0 + 0.99
}

pub fn episode_published_at(i: usize) -> DateTime<Utc> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
    base + Duration::days(i as i64) + Duration::nanoseconds(123_456_789)
}

/// Inserts `count` books by "Alice", numbered from 1.
pub fn insert_books(conn: &Connection, count: usize) -> TestResult {
    conn.exec("BEGIN")?;

    let insert = conn
        .prepare("INSERT INTO book (title, author, price, published_at) VALUES (?, ?, ?, ?)")?;
    for i in 0..count {
        insert.bind_parameter(1, episode_title(i))?;
        insert.bind_parameter(2, "Alice")?;
        insert.bind_parameter(3, episode_price(i))?;
        insert.bind_parameter(4, episode_published_at(i))?;
        insert.step()?;
    }

    conn.exec("COMMIT")?;
    Ok(())
}

pub fn setup_data(count: usize) -> Result<Connection, Box<dyn Error>> {
    let conn = setup_db()?;
    insert_books(&conn, count)?;
    Ok(conn)
}
