use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validate, Violations};
use crate::db::models::DbWaterSample;
use crate::error::FieldViolation;

/// Water-quality measurements taken in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaterRequest {
    #[serde(rename = "cidade")]
    pub city: String,
    pub ph: f64,
    #[serde(rename = "oxigenio")]
    pub oxygen: f64,
    #[serde(rename = "nitrato")]
    pub nitrate: f64,
    #[serde(rename = "fosfato")]
    pub phosphate: f64,
    #[serde(rename = "microplastico")]
    pub microplastic: f64,
    #[serde(rename = "qualidadeDaAgua")]
    pub quality: String,
}

impl Validate for WaterRequest {
    fn violations(&self) -> Vec<FieldViolation> {
        let mut v = Violations::default();
        v.not_blank(&self.city, "cidade");
        v.check(
            (0.0..=14.0).contains(&self.ph),
            "ph",
            "must be between 0 and 14",
        );
        v.non_negative(self.oxygen, "oxigenio");
        v.non_negative(self.nitrate, "nitrato");
        v.non_negative(self.phosphate, "fosfato");
        v.non_negative(self.microplastic, "microplastico");
        v.not_blank(&self.quality, "qualidadeDaAgua");
        v.into_inner()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaterResponse {
    pub id: i64,
    #[serde(rename = "cidade")]
    pub city: String,
    pub ph: f64,
    #[serde(rename = "oxigenio")]
    pub oxygen: f64,
    #[serde(rename = "nitrato")]
    pub nitrate: f64,
    #[serde(rename = "fosfato")]
    pub phosphate: f64,
    #[serde(rename = "microplastico")]
    pub microplastic: f64,
    #[serde(rename = "qualidadeDaAgua")]
    pub quality: String,
}

impl From<DbWaterSample> for WaterResponse {
    fn from(row: DbWaterSample) -> Self {
        Self {
            id: row.id,
            city: row.city,
            ph: row.ph,
            oxygen: row.oxygen,
            nitrate: row.nitrate,
            phosphate: row.phosphate,
            microplastic: row.microplastic,
            quality: row.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WaterRequest {
        WaterRequest {
            city: "Santos".into(),
            ph: 7.2,
            oxygen: 6.5,
            nitrate: 0.4,
            phosphate: 0.1,
            microplastic: 2.0,
            quality: "boa".into(),
        }
    }

    #[test]
    fn valid_sample_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn reports_each_bad_field() {
        let req = WaterRequest {
            city: "  ".into(),
            ph: 15.0,
            nitrate: f64::NAN,
            ..sample()
        };
        let fields: Vec<_> = req.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["cidade", "ph", "nitrato"]);
    }

    #[test]
    fn decodes_wire_names() {
        let req: WaterRequest = serde_json::from_str(
            r#"{"cidade":"Santos","ph":7.2,"oxigenio":6.5,"nitrato":0.4,
                "fosfato":0.1,"microplastico":2.0,"qualidadeDaAgua":"boa"}"#,
        )
        .unwrap();
        assert_eq!(req, sample());
    }
}
