//! Database models shared across the finance repository.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::domain::types::TypeConstraintError;

pub mod category;
pub mod config;
pub mod movement;
pub mod project;
pub mod report;

/// Reads a `DOUBLE` money column, rounded to the cent.
pub(crate) fn money_from_db(value: f64) -> Result<Decimal, TypeConstraintError> {
    Decimal::from_f64(value)
        .map(|amount| amount.round_dp(2))
        .ok_or(TypeConstraintError::NonFiniteAmount)
}

/// Reads a nullable aggregate, where a missing sum means zero.
pub(crate) fn sum_from_db(value: Option<f64>) -> Result<Decimal, TypeConstraintError> {
    value.map(money_from_db).unwrap_or(Ok(Decimal::ZERO))
}

pub(crate) fn money_to_db(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
