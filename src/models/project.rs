//! Diesel models for projects and their summary view.

use diesel::prelude::*;

use crate::domain::project::{Project as DomainProject, ProjectSummary as DomainProjectSummary};
use crate::domain::types::{ProjectId, TypeConstraintError};
use crate::models::sum_from_db;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::projetos)]
/// Diesel model for [`crate::domain::project::Project`].
pub struct Project {
    pub id: i32,
    pub nome: String,
    pub ano_base: i32,
    pub linha_programa: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vw_resumo_projetos)]
/// Row of `vw_resumo_projetos`.
pub struct ProjectSummary {
    pub projeto_id: i32,
    pub nome: String,
    pub ano_base: i32,
    pub linha_programa: Option<String>,
    pub total_planejado: Option<f64>,
    pub total_executado: Option<f64>,
    pub total_entradas: Option<f64>,
    pub saldo_planejado: Option<f64>,
}

impl TryFrom<Project> for DomainProject {
    type Error = TypeConstraintError;

    fn try_from(project: Project) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::try_from(project.id)?,
            name: project.nome,
            base_year: project.ano_base,
        })
    }
}

impl TryFrom<ProjectSummary> for DomainProjectSummary {
    type Error = TypeConstraintError;

    fn try_from(row: ProjectSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: ProjectId::try_from(row.projeto_id)?,
            name: row.nome,
            base_year: row.ano_base,
            program_line: row.linha_programa,
            total_planned: sum_from_db(row.total_planejado)?,
            total_executed: sum_from_db(row.total_executado)?,
            total_inflow: sum_from_db(row.total_entradas)?,
            planned_balance: sum_from_db(row.saldo_planejado)?,
        })
    }
}
