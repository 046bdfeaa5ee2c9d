pub mod hateoas;
pub mod page;
pub mod potential;
pub mod user;
pub mod water;

use crate::error::{CadastroError, FieldViolation};

/// Field-level checks run on request bodies after JSON decoding.
pub trait Validate {
    fn violations(&self) -> Vec<FieldViolation>;

    fn validate(&self) -> Result<(), CadastroError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CadastroError::Validation(violations))
        }
    }
}

/// Collects violations while a request is being checked.
#[derive(Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    pub(crate) fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.0.push(FieldViolation { field, message });
        }
    }

    pub(crate) fn not_blank(&mut self, value: &str, field: &'static str) {
        self.check(!value.trim().is_empty(), field, "must not be blank");
    }

    pub(crate) fn non_negative(&mut self, value: f64, field: &'static str) {
        self.check(
            value.is_finite() && value >= 0.0,
            field,
            "must be a finite number >= 0",
        );
    }

    pub(crate) fn into_inner(self) -> Vec<FieldViolation> {
        self.0
    }
}
