use chrono::NaiveDate;
use sqlx::FromRow;

use crate::db::records::{FieldValue, Record, RecordValues};
use crate::types::potential::PotentialRequest;
use crate::types::water::WaterRequest;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbCredential {
    pub id: i64,
    pub email: String,
    pub password: String,
}

/// A user joined with the e-mail of its credential, if any.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub denomination: String,
    pub birth_date: NaiveDate,
    pub credential_id: Option<i64>,
    pub credential_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbWaterSample {
    pub id: i64,
    pub city: String,
    pub ph: f64,
    pub oxygen: f64,
    pub nitrate: f64,
    pub phosphate: f64,
    pub microplastic: f64,
    pub quality: String,
}

impl Record for DbWaterSample {
    const TABLE: &'static str = "water_samples";
    const COLUMNS: &'static [&'static str] = &[
        "city",
        "ph",
        "oxygen",
        "nitrate",
        "phosphate",
        "microplastic",
        "quality",
    ];
    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("cidade", "city"),
        ("ph", "ph"),
        ("oxigenio", "oxygen"),
        ("nitrato", "nitrate"),
        ("fosfato", "phosphate"),
        ("microplastico", "microplastic"),
        ("qualidadeDaAgua", "quality"),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl RecordValues for WaterRequest {
    fn values(self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.city),
            FieldValue::Real(self.ph),
            FieldValue::Real(self.oxygen),
            FieldValue::Real(self.nitrate),
            FieldValue::Real(self.phosphate),
            FieldValue::Real(self.microplastic),
            FieldValue::Text(self.quality),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbPotential {
    pub id: i64,
    pub city: String,
    pub scale: i64,
}

impl Record for DbPotential {
    const TABLE: &'static str = "potentials";
    const COLUMNS: &'static [&'static str] = &["city", "scale"];
    const SORTABLE: &'static [(&'static str, &'static str)] =
        &[("id", "id"), ("cidade", "city"), ("escala", "scale")];

    fn id(&self) -> i64 {
        self.id
    }
}

impl RecordValues for PotentialRequest {
    fn values(self) -> Vec<FieldValue> {
        vec![FieldValue::Text(self.city), FieldValue::Integer(self.scale)]
    }
}
