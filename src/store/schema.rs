//! Database schema and migrations.
//!
//! Migrations run in order; `PRAGMA user_version` records how many have
//! been applied, so opening an existing database only applies new ones.

use rusqlite::Connection;
use tracing::info;

const MIGRATIONS: &[&str] = &[
    // 1: initial schema
    r#"
    CREATE TABLE contents (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        title   TEXT NOT NULL,
        text    TEXT NOT NULL DEFAULT '',
        image   TEXT,
        slug    TEXT
    );
    CREATE INDEX idx_contents_slug ON contents(slug);

    CREATE TABLE job_categories (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        priority INTEGER
    );

    CREATE TABLE bios (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id         INTEGER,
        name            TEXT UNIQUE,
        job_title       TEXT NOT NULL,
        job_category_id INTEGER REFERENCES job_categories(id) ON DELETE SET NULL,
        image           TEXT,
        text            TEXT NOT NULL DEFAULT '',
        slug            TEXT,
        visible         INTEGER NOT NULL DEFAULT 1
    );
    CREATE INDEX idx_bios_slug ON bios(slug);
    CREATE INDEX idx_bios_user ON bios(user_id);
    CREATE INDEX idx_bios_job_category ON bios(job_category_id);

    CREATE TABLE announcements (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        title    TEXT NOT NULL,
        text     TEXT NOT NULL DEFAULT '',
        pub_date TEXT,
        image    TEXT,
        active   INTEGER NOT NULL
    );

    CREATE TABLE programs (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        title         TEXT NOT NULL UNIQUE,
        slug          TEXT,
        producer_id   INTEGER REFERENCES bios(id) ON DELETE SET NULL,
        producer_name TEXT,
        description   TEXT NOT NULL DEFAULT '',
        link          TEXT
    );
    CREATE INDEX idx_programs_slug ON programs(slug);
    CREATE INDEX idx_programs_producer ON programs(producer_id);

    CREATE TABLE schedule_slots (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        program_id INTEGER NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
        medium     TEXT NOT NULL CHECK (medium IN ('radio', 'tv')),
        day        INTEGER NOT NULL CHECK (day BETWEEN -3 AND 6),
        start_time TEXT NOT NULL,
        end_time   TEXT NOT NULL
    );
    CREATE INDEX idx_schedule_slots_program ON schedule_slots(program_id);
    CREATE INDEX idx_schedule_slots_medium_day ON schedule_slots(medium, day, start_time);

    CREATE TABLE articles (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        author_id   INTEGER REFERENCES bios(id) ON DELETE SET NULL,
        author_name TEXT
    );
    CREATE INDEX idx_articles_author ON articles(author_id);
    "#,
];

/// Schema version a fully migrated database reports
pub fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}

/// Current schema version of a database
pub fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Apply every migration the database has not seen yet
pub fn migrate(conn: &mut Connection) -> rusqlite::Result<()> {
    let current = current_version(conn)?;

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = idx as i64 + 1;
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!(version, "Applied schema migration");
    }

    Ok(())
}
