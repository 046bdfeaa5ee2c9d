use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validate, Violations};
use crate::db::models::DbPotential;
use crate::error::FieldViolation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PotentialRequest {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "escala")]
    pub scale: i64,
}

impl Validate for PotentialRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.not_blank(&self.city, "cidade");
        v.check(self.scale >= 0, "escala", "must be >= 0");
        v.into_inner()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PotentialResponse {
    pub id: i64,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "escala")]
    pub scale: i64,
}

impl From<DbPotential> for PotentialResponse {
    fn from(row: DbPotential) -> Self {
        Self {
            id: row.id,
            city: row.city,
            scale: row.scale,
        }
    }
}
