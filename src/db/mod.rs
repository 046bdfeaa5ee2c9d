//! Database module: schema, row models and storage queries.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `models.rs`: Rust structs mirroring DB rows
//! - `sqlite.rs`: pool, schema bootstrap and transactions
//! - `records.rs`: generic CRUD for single-table records
//! - `filter.rs`: partial-match user filter
//! - `users.rs`: credential and user queries

pub mod filter;
pub mod models;
pub mod records;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use models::{DbCredential, DbPotential, DbUser, DbWaterSample};
pub use schema::SQLITE_INIT;
pub use sqlite::{CadastroStorage, SqlitePool};
