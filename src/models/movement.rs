//! Diesel models for financial movements.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::movement::{
    MovementRow as DomainMovementRow, NewMovement as DomainNewMovement,
    UpdateMovement as DomainUpdateMovement,
};
use crate::domain::types::{CategoryId, MovementId, ProjectId, TypeConstraintError};
use crate::models::{money_from_db, money_to_db};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vw_movimentos_lista)]
/// Row of `vw_movimentos_lista`.
pub struct MovementRow {
    pub id: i32,
    pub projeto_id: i32,
    pub projeto_nome: String,
    pub ano_base: i32,
    pub tipo: String,
    pub data_movimento: NaiveDate,
    pub categoria_gasto_id: Option<i32>,
    pub categoria_nome: Option<String>,
    pub descricao: Option<String>,
    pub valor_total: Option<f64>,
    pub status: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::movimentos_financeiros)]
/// Insertable form of a movement.
pub struct NewMovement<'a> {
    pub projeto_id: i32,
    pub tipo: &'a str,
    pub data_movimento: NaiveDate,
    pub categoria_gasto_id: Option<i32>,
    pub descricao: Option<&'a str>,
    pub valor_total: f64,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::movimentos_financeiros)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a movement; `None` clears the column.
pub struct UpdateMovement<'a> {
    pub projeto_id: i32,
    pub tipo: &'a str,
    pub data_movimento: NaiveDate,
    pub categoria_gasto_id: Option<i32>,
    pub descricao: Option<&'a str>,
    pub valor_total: f64,
    pub status: &'a str,
}

impl TryFrom<MovementRow> for DomainMovementRow {
    type Error = TypeConstraintError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MovementId::try_from(row.id)?,
            project_id: ProjectId::try_from(row.projeto_id)?,
            project_name: row.projeto_nome,
            base_year: row.ano_base,
            kind: row.tipo,
            date: row.data_movimento,
            category_id: row.categoria_gasto_id.map(CategoryId::try_from).transpose()?,
            category_name: row.categoria_nome,
            description: row.descricao,
            amount: row.valor_total.map(money_from_db).transpose()?,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewMovement> for NewMovement<'a> {
    fn from(movement: &'a DomainNewMovement) -> Self {
        Self {
            projeto_id: movement.project_id.get(),
            tipo: movement.kind.as_str(),
            data_movimento: movement.date,
            categoria_gasto_id: movement.category_id.map(CategoryId::get),
            descricao: Some(movement.description.as_str()),
            valor_total: money_to_db(movement.amount),
            status: movement.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateMovement> for UpdateMovement<'a> {
    fn from(movement: &'a DomainUpdateMovement) -> Self {
        Self {
            projeto_id: movement.project_id.get(),
            tipo: movement.kind.as_str(),
            data_movimento: movement.date,
            categoria_gasto_id: movement.category_id.map(CategoryId::get),
            descricao: Some(movement.description.as_str()),
            valor_total: money_to_db(movement.amount),
            status: movement.status.as_str(),
        }
    }
}
