use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnection, SqliteExecutor};
use sqlx::{QueryBuilder, Sqlite};

use crate::db::filter::UserExample;
use crate::db::models::{DbCredential, DbUser};
use crate::db::sqlite::CadastroStorage;
use crate::error::CadastroError;
use crate::types::page::{Page, PageRequest};

const USER_SELECT: &str = r#"SELECT u.id, u.denomination, u.birth_date, u.credential_id,
       c.email AS credential_email
  FROM users u
  LEFT JOIN credentials c ON c.id = u.credential_id"#;

const USER_SORTABLE: &[(&str, &str)] = &[
    ("id", "u.id"),
    ("denominacao", "u.denomination"),
    ("nascimento", "u.birth_date"),
];

impl CadastroStorage {
    pub async fn find_credential_by_id(&self, id: i64) -> Result<Option<DbCredential>, CadastroError> {
        let row = sqlx::query_as::<_, DbCredential>(
            "SELECT id, email, password FROM credentials WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<DbCredential>, CadastroError> {
        let row = sqlx::query_as::<_, DbCredential>(
            "SELECT id, email, password FROM credentials WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<DbUser>, CadastroError> {
        fetch_user(self.pool(), id).await
    }

    pub async fn find_user_by_credential(
        &self,
        credential_id: i64,
    ) -> Result<Option<DbUser>, CadastroError> {
        let sql = format!("{USER_SELECT} WHERE u.credential_id = ?");
        let row = sqlx::query_as::<_, DbUser>(&sql)
            .bind(credential_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row)
    }

    /// One page of users matching `example`.
    pub async fn search_users(
        &self,
        example: &UserExample,
        page: &PageRequest,
    ) -> Result<Page<DbUser>, CadastroError> {
        let mut qb = QueryBuilder::<Sqlite>::new(USER_SELECT);
        example.push_where(&mut qb);
        page.push_order_and_limit(&mut qb, USER_SORTABLE, "u.id")?;
        let rows = qb.build_query_as::<DbUser>().fetch_all(self.pool()).await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users u");
        example.push_where(&mut count);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(self.pool()).await?;

        Ok(Page::new(rows, page, total.max(0) as u64))
    }
}

/// Insert a credential; duplicate e-mails surface as `Conflict`.
pub async fn insert_credential(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
) -> Result<DbCredential, CadastroError> {
    sqlx::query_as::<_, DbCredential>(
        "INSERT INTO credentials (email, password) VALUES (?, ?) RETURNING id, email, password",
    )
    .bind(email)
    .bind(password)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| CadastroError::from_unique(e, format!("e-mail already registered: {email}")))
}

/// Insert a user and return it joined with its credential.
pub async fn insert_user(
    conn: &mut SqliteConnection,
    denomination: &str,
    birth_date: NaiveDate,
    credential_id: Option<i64>,
) -> Result<DbUser, CadastroError> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (denomination, denomination_folded, birth_date, credential_id) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(denomination)
    .bind(denomination.to_lowercase())
    .bind(birth_date)
    .bind(credential_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| CadastroError::from_unique(e, "credential already bound to another user"))?;

    fetch_user(&mut *conn, id)
        .await?
        .ok_or(CadastroError::NotFound)
}

async fn fetch_user<'e, E>(executor: E, id: i64) -> Result<Option<DbUser>, CadastroError>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{USER_SELECT} WHERE u.id = ?");
    let row = sqlx::query_as::<_, DbUser>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}
