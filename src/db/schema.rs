//! SQL DDL for initializing the registry database.
//! SQLite-first design; every statement is idempotent.

/// SQLite schema with:
/// - `credentials.email` UNIQUE, looked up on login and user search
/// - `users.credential_id` UNIQUE, a credential belongs to at most one user
/// - `users.birth_date` stored as ISO `YYYY-MM-DD` text
/// - `users.denomination_folded` holds the Unicode-lowercased name for search
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS credentials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    denomination TEXT NOT NULL,
    denomination_folded TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    credential_id INTEGER NULL UNIQUE REFERENCES credentials(id)
);

CREATE INDEX IF NOT EXISTS idx_users_denomination_folded ON users(denomination_folded);

CREATE TABLE IF NOT EXISTS water_samples (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    ph REAL NOT NULL,
    oxygen REAL NOT NULL,
    nitrate REAL NOT NULL,
    phosphate REAL NOT NULL,
    microplastic REAL NOT NULL,
    quality TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS potentials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    scale INTEGER NOT NULL
);
"#;
