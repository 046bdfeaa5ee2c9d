use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use crate::db::filter::UserExample;
use crate::db::models::{DbCredential, DbUser};
use crate::db::sqlite::CadastroStorage;
use crate::db::users::{insert_credential, insert_user};
use crate::error::CadastroError;
use crate::types::page::{Page, PageRequest};
use crate::types::user::{UserRequest, UserSearchParams};

pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas";

#[derive(Clone)]
pub struct UserService {
    storage: CadastroStorage,
}

impl UserService {
    pub fn new(storage: CadastroStorage) -> Self {
        Self { storage }
    }

    /// Partial-match search. A credential id (> 0) wins over a credential e-mail;
    /// a reference that resolves to nothing leaves the credential unconstrained.
    pub async fn search(
        &self,
        params: &UserSearchParams,
        page: &PageRequest,
    ) -> Result<Page<DbUser>, CadastroError> {
        let credential = self
            .resolve_credential(params.credential_id, params.credential_email.as_deref())
            .await?;

        let example = UserExample {
            denomination: params.denomination.clone(),
            birth_date: params.birth_date,
            credential_id: credential.map(|c| c.id),
        };
        debug!(?example, unconstrained = example.is_unconstrained(), "searching users");

        let found = self.storage.search_users(&example, page).await?;
        if found.is_empty() {
            return Err(CadastroError::NotFound);
        }
        Ok(found)
    }

    async fn resolve_credential(
        &self,
        credential_id: Option<i64>,
        credential_email: Option<&str>,
    ) -> Result<Option<DbCredential>, CadastroError> {
        match (credential_id, credential_email) {
            (Some(id), _) if id > 0 => self.storage.find_credential_by_id(id).await,
            (_, Some(email)) if !email.is_empty() => {
                self.storage.find_credential_by_email(email).await
            }
            _ => Ok(None),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<DbUser, CadastroError> {
        self.storage
            .find_user_by_id(id)
            .await?
            .ok_or(CadastroError::NotFound)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<DbUser, CadastroError> {
        let credential = self
            .storage
            .find_credential_by_email(email)
            .await?
            .ok_or(CadastroError::NotFound)?;
        self.storage
            .find_user_by_credential(credential.id)
            .await?
            .ok_or(CadastroError::NotFound)
    }

    /// Register a user, and its credential when one is supplied, in one transaction.
    pub async fn create(&self, request: UserRequest) -> Result<DbUser, CadastroError> {
        let mut tx = self.storage.begin().await?;

        let credential_id = match &request.credential {
            Some(credential) => {
                let stored =
                    insert_credential(&mut tx, &credential.email, &credential.password).await?;
                Some(stored.id)
            }
            None => None,
        };
        let user = insert_user(
            &mut tx,
            &request.denomination,
            request.birth_date,
            credential_id,
        )
        .await?;
        tx.commit().await?;

        info!(user_id = user.id, credential_id = ?user.credential_id, "user registered");
        Ok(user)
    }

    /// Stateless credential check; returns the matched credential.
    ///
    /// Passwords are stored as submitted, so this is a plain byte comparison.
    pub async fn login(&self, email: &str, password: &str) -> Result<DbCredential, CadastroError> {
        let Some(credential) = self.storage.find_credential_by_email(email).await? else {
            warn!(email, "login rejected: unknown e-mail");
            return Err(CadastroError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !bool::from(credential.password.as_bytes().ct_eq(password.as_bytes())) {
            warn!(email, "login rejected: wrong password");
            return Err(CadastroError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!(credential_id = credential.id, "login succeeded");
        Ok(credential)
    }
}
