//! Read-only aggregates computed by the reporting views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inflow/outflow sums of one project for one month (`vw_executado_por_mes`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotals {
    /// First day of the month.
    pub month: NaiveDate,
    pub inflow: Decimal,
    pub outflow: Decimal,
}

/// Planned versus executed amounts of one category
/// (`vw_planejado_executado_categoria`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryExecution {
    pub category: String,
    pub planned: Decimal,
    pub executed: Decimal,
    pub balance: Decimal,
    /// Undefined when nothing was planned for the category.
    pub execution_percent: Option<Decimal>,
}
