use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use super::{Validate, Violations};
use crate::db::models::DbUser;
use crate::error::FieldViolation;

#[derive(Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredentialRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl fmt::Debug for CredentialRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    #[serde(rename = "denominacao")]
    pub denomination: String,
    #[serde(rename = "nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "credencial", default)]
    pub credential: Option<CredentialRequest>,
}

impl Validate for UserRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.not_blank(&self.denomination, "denominacao");
        if let Some(credential) = &self.credential {
            v.not_blank(&credential.email, "credencial.email");
            v.check(
                credential.email.contains('@'),
                "credencial.email",
                "must be an e-mail address",
            );
            v.not_blank(&credential.password, "credencial.senha");
        }
        v.into_inner()
    }
}

/// Optional filters for the user listing; absent or empty fields match anything.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchParams {
    /// Denominação do usuário, sem distinção de maiúsculas
    #[serde(rename = "denominacao", default, deserialize_with = "empty_as_none")]
    pub denomination: Option<String>,
    /// Data de nascimento do usuário
    #[serde(rename = "nascimento", default, deserialize_with = "empty_as_none")]
    pub birth_date: Option<NaiveDate>,
    /// ID da credencial associada ao usuário
    #[serde(rename = "credencial.id", default, deserialize_with = "empty_as_none")]
    pub credential_id: Option<i64>,
    /// E-mail da credencial associada ao usuário
    #[serde(rename = "credencial.email", default, deserialize_with = "empty_as_none")]
    pub credential_email: Option<String>,
}

/// `?nascimento=` binds to `None` rather than failing to parse.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginParams {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredentialResponse {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "denominacao")]
    pub denomination: String,
    #[serde(rename = "nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "credencial")]
    pub credential: Option<CredentialResponse>,
}

impl From<DbUser> for UserResponse {
    fn from(row: DbUser) -> Self {
        let credential = match (row.credential_id, row.credential_email) {
            (Some(id), Some(email)) => Some(CredentialResponse { id, email }),
            _ => None,
        };
        Self {
            id: row.id,
            denomination: row.denomination,
            birth_date: row.birth_date,
            credential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::extract::rejection::QueryRejection;
    use axum::http::Uri;

    #[test]
    fn credential_is_optional_on_create() {
        let req: UserRequest =
            serde_json::from_str(r#"{"denominacao":"Ana","nascimento":"1990-04-12"}"#).unwrap();
        assert!(req.credential.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn bad_credential_fields_are_reported() {
        let req: UserRequest = serde_json::from_str(
            r#"{"denominacao":"","nascimento":"1990-04-12",
                "credencial":{"email":"nope","senha":" "}}"#,
        )
        .unwrap();
        let fields: Vec<_> = req.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["denominacao", "credencial.email", "credencial.senha"]
        );
    }

    fn search(uri: &str) -> Result<UserSearchParams, QueryRejection> {
        Query::<UserSearchParams>::try_from_uri(&uri.parse::<Uri>().unwrap()).map(|q| q.0)
    }

    #[test]
    fn empty_search_values_are_wildcards() {
        let params =
            search("/cadastro?denominacao=&nascimento=&credencial.id=&credencial.email=").unwrap();
        assert!(params.denomination.is_none());
        assert!(params.birth_date.is_none());
        assert!(params.credential_id.is_none());
        assert!(params.credential_email.is_none());
    }

    #[test]
    fn populated_search_values_still_parse() {
        let params = search("/cadastro?nascimento=1990-04-12&credencial.id=7").unwrap();
        assert_eq!(params.birth_date, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(params.credential_id, Some(7));

        assert!(search("/cadastro?nascimento=ontem").is_err());
    }

    #[test]
    fn password_never_shows_in_debug_output() {
        let req = CredentialRequest {
            email: "a@b.com".into(),
            password: "x123".into(),
        };
        assert!(!format!("{req:?}").contains("x123"));
    }
}
