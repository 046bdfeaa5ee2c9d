//! Partial-match ("query by example") filtering for users.
//!
//! Populated fields become equality predicates joined with `AND`; text compares
//! case-insensitively. Unpopulated fields match anything.
//!
//! SQLite's `lower()` only folds ASCII, so names are folded here with
//! `str::to_lowercase` and matched against `users.denomination_folded`.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserExample {
    pub denomination: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub credential_id: Option<i64>,
}

impl UserExample {
    pub fn is_unconstrained(&self) -> bool {
        self.denomination.is_none() && self.birth_date.is_none() && self.credential_id.is_none()
    }

    /// Append a `WHERE` clause over the `u` (users) alias, or nothing.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut clause = WhereClause::new(qb);

        if let Some(denomination) = &self.denomination {
            clause
                .predicate()
                .push("u.denomination_folded = ")
                .push_bind(denomination.to_lowercase());
        }
        if let Some(birth_date) = self.birth_date {
            clause.predicate().push("u.birth_date = ").push_bind(birth_date);
        }
        if let Some(credential_id) = self.credential_id {
            clause
                .predicate()
                .push("u.credential_id = ")
                .push_bind(credential_id);
        }
    }
}

struct WhereClause<'q, 'args> {
    qb: &'q mut QueryBuilder<'args, Sqlite>,
    started: bool,
}

impl<'q, 'args> WhereClause<'q, 'args> {
    fn new(qb: &'q mut QueryBuilder<'args, Sqlite>) -> Self {
        Self { qb, started: false }
    }

    fn predicate(&mut self) -> &mut QueryBuilder<'args, Sqlite> {
        self.qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        &mut *self.qb
    }
}
