//! Diesel models for the reporting views.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::domain::report::{
    CategoryExecution as DomainCategoryExecution, MonthlyTotals as DomainMonthlyTotals,
};
use crate::domain::types::TypeConstraintError;
use crate::models::sum_from_db;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vw_executado_por_mes)]
/// Row of `vw_executado_por_mes` without the project key.
pub struct MonthlyTotals {
    pub mes: NaiveDate,
    pub total_entradas: Option<f64>,
    pub total_saidas: Option<f64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vw_planejado_executado_categoria)]
/// Row of `vw_planejado_executado_categoria` without the project key.
pub struct CategoryExecution {
    pub categoria: String,
    pub valor_planejado: Option<f64>,
    pub valor_executado: Option<f64>,
    pub saldo: Option<f64>,
    pub execucao_percentual: Option<f64>,
}

impl TryFrom<MonthlyTotals> for DomainMonthlyTotals {
    type Error = TypeConstraintError;

    fn try_from(row: MonthlyTotals) -> Result<Self, Self::Error> {
        Ok(Self {
            month: row.mes,
            inflow: sum_from_db(row.total_entradas)?,
            outflow: sum_from_db(row.total_saidas)?,
        })
    }
}

impl TryFrom<CategoryExecution> for DomainCategoryExecution {
    type Error = TypeConstraintError;

    fn try_from(row: CategoryExecution) -> Result<Self, Self::Error> {
        Ok(Self {
            category: row.categoria,
            planned: sum_from_db(row.valor_planejado)?,
            executed: sum_from_db(row.valor_executado)?,
            balance: sum_from_db(row.saldo)?,
            execution_percent: row.execucao_percentual.and_then(Decimal::from_f64),
        })
    }
}
