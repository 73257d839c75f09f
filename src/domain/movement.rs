use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, DEFAULT_MOVEMENT_STATUS, MovementId, MovementKind, ProjectId,
};

/// Movement as exposed by `vw_movimentos_lista`, with denormalized names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MovementRow {
    pub id: MovementId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub base_year: i32,
    /// Raw type label as stored; see [`MovementKind::matches`].
    pub kind: String,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for inserting a movement into `movimentos_financeiros`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovement {
    pub project_id: ProjectId,
    pub kind: MovementKind,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub amount: Decimal,
    pub status: String,
}

impl NewMovement {
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        kind: MovementKind,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        description: &str,
        amount: Decimal,
    ) -> Self {
        Self {
            project_id,
            kind,
            date,
            category_id,
            description: description.trim().to_string(),
            amount,
            status: DEFAULT_MOVEMENT_STATUS.to_string(),
        }
    }
}

/// Full replacement of a movement's editable fields.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateMovement {
    pub project_id: ProjectId,
    pub kind: MovementKind,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub amount: Decimal,
    pub status: String,
}

/// Inflow, outflow and balance over a set of listed movements.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct MovementTotals {
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
}

impl MovementTotals {
    /// Sums the rows by their type label.
    ///
    /// Inflow and outflow are independent sums over the rows whose label
    /// matches each direction (see [`MovementKind::matches`]); a row may add
    /// to both or to neither. Missing amounts count as zero.
    pub fn from_rows(rows: &[MovementRow]) -> Self {
        let sum = |kind: MovementKind| -> Decimal {
            rows.iter()
                .filter(|row| kind.matches(&row.kind))
                .filter_map(|row| row.amount)
                .sum()
        };
        let inflow = sum(MovementKind::Inflow);
        let outflow = sum(MovementKind::Outflow);

        Self {
            inflow,
            outflow,
            balance: inflow - outflow,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    use rust_decimal::prelude::FromPrimitive;

    /// Builds a listed movement with sensible defaults for tests.
    pub fn movement_row(id: i32, kind: &str, date: &str, amount: f64) -> MovementRow {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date");
        MovementRow {
            id: MovementId::new(id).expect("positive id"),
            project_id: ProjectId::new(1).expect("positive id"),
            project_name: "Projeto Piloto".to_string(),
            base_year: 2025,
            kind: kind.to_string(),
            date,
            category_id: None,
            category_name: None,
            description: Some(format!("Movimento {id}")),
            amount: Decimal::from_f64(amount),
            status: Some(DEFAULT_MOVEMENT_STATUS.to_string()),
            created_at: date.and_hms_opt(12, 0, 0).expect("valid time"),
        }
    }
}
