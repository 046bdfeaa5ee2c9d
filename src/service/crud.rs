use std::marker::PhantomData;

use tracing::{debug, info};

use crate::db::records::{self, Record, RecordValues};
use crate::db::sqlite::CadastroStorage;
use crate::error::CadastroError;
use crate::types::page::{Page, PageRequest};

/// List/get/create/update/delete for one record type. Writes run in a transaction.
pub struct CrudService<R> {
    storage: CadastroStorage,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> CrudService<R> {
    pub fn new(storage: CadastroStorage) -> Self {
        Self {
            storage,
            _record: PhantomData,
        }
    }

    /// A non-empty page, or `NotFound`.
    pub async fn list(&self, page: &PageRequest) -> Result<Page<R>, CadastroError> {
        let found = records::find_page::<R>(self.storage.pool(), page).await?;
        debug!(
            table = R::TABLE,
            page = page.number,
            returned = found.content.len(),
            "listed records"
        );
        if found.is_empty() {
            return Err(CadastroError::NotFound);
        }
        Ok(found)
    }

    pub async fn get(&self, id: i64) -> Result<R, CadastroError> {
        let mut conn = self.storage.pool().acquire().await?;
        records::find_by_id::<R>(&mut conn, id)
            .await?
            .ok_or(CadastroError::NotFound)
    }

    pub async fn create(&self, request: impl RecordValues) -> Result<R, CadastroError> {
        let mut tx = self.storage.begin().await?;
        let created = records::insert::<R>(&mut tx, request.values()).await?;
        tx.commit().await?;

        info!(table = R::TABLE, id = created.id(), "record created");
        Ok(created)
    }

    /// Overwrite every editable field; `NotFound` when `id` does not exist.
    pub async fn update(&self, id: i64, request: impl RecordValues) -> Result<R, CadastroError> {
        let mut tx = self.storage.begin().await?;
        let updated = records::update::<R>(&mut tx, id, request.values())
            .await?
            .ok_or(CadastroError::NotFound)?;
        tx.commit().await?;

        info!(table = R::TABLE, id, "record updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CadastroError> {
        let mut tx = self.storage.begin().await?;
        if !records::delete::<R>(&mut tx, id).await? {
            return Err(CadastroError::NotFound);
        }
        tx.commit().await?;

        info!(table = R::TABLE, id, "record deleted");
        Ok(())
    }
}
