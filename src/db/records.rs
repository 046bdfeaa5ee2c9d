//! Single-table CRUD primitives shared by every plain record type.
//!
//! A `Record` names its table and editable columns; request bodies hand over
//! their values through `RecordValues` in the same column order.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{FromRow, QueryBuilder, Sqlite};

use crate::db::sqlite::SqlitePool;
use crate::error::CadastroError;
use crate::types::page::{Page, PageRequest};

/// A value bound into an INSERT or UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Real(f64),
    Integer(i64),
}

impl FieldValue {
    fn push_bind(self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            FieldValue::Text(v) => qb.push_bind(v),
            FieldValue::Real(v) => qb.push_bind(v),
            FieldValue::Integer(v) => qb.push_bind(v),
        };
    }
}

pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    /// Editable columns, excluding `id`.
    const COLUMNS: &'static [&'static str];
    /// Wire property name -> column, for `sort=` parameters.
    const SORTABLE: &'static [(&'static str, &'static str)];

    fn id(&self) -> i64;
}

/// Editable values of a request, ordered as `Record::COLUMNS`.
pub trait RecordValues {
    fn values(self) -> Vec<FieldValue>;
}

pub async fn find_page<R: Record>(
    pool: &SqlitePool,
    page: &PageRequest,
) -> Result<Page<R>, CadastroError> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {}", R::TABLE));
    page.push_order_and_limit(&mut qb, R::SORTABLE, "id")?;
    let rows = qb.build_query_as::<R>().fetch_all(pool).await?;

    let count_sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
    let total: i64 = sqlx::query_scalar(&count_sql).fetch_one(pool).await?;

    Ok(Page::new(rows, page, total.max(0) as u64))
}

pub async fn find_by_id<R: Record>(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<R>, CadastroError> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
    let row = sqlx::query_as::<_, R>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn insert<R: Record>(
    conn: &mut SqliteConnection,
    values: Vec<FieldValue>,
) -> Result<R, CadastroError> {
    debug_assert_eq!(values.len(), R::COLUMNS.len(), "{} insert arity", R::TABLE);
    let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", R::TABLE));
    qb.push(R::COLUMNS.join(", ")).push(") VALUES (");
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.push_bind(&mut qb);
    }
    qb.push(") RETURNING *");

    let row = qb.build_query_as::<R>().fetch_one(&mut *conn).await?;
    Ok(row)
}

/// Overwrite every editable column of row `id`; `None` when no such row exists.
pub async fn update<R: Record>(
    conn: &mut SqliteConnection,
    id: i64,
    values: Vec<FieldValue>,
) -> Result<Option<R>, CadastroError> {
    debug_assert_eq!(values.len(), R::COLUMNS.len(), "{} update arity", R::TABLE);
    let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", R::TABLE));
    for (i, (column, value)) in R::COLUMNS.iter().zip(values).enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(*column).push(" = ");
        value.push_bind(&mut qb);
    }
    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

    let row = qb.build_query_as::<R>().fetch_optional(&mut *conn).await?;
    Ok(row)
}

/// Returns whether a row was removed.
pub async fn delete<R: Record>(conn: &mut SqliteConnection, id: i64) -> Result<bool, CadastroError> {
    let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
    let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
    Ok(result.rows_affected() > 0)
}
