use diesel::prelude::*;

use crate::domain::project::{Project, ProjectSummary};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProjectReader};

impl ProjectReader for DieselRepository {
    fn list_project_summaries(&self) -> RepositoryResult<Vec<ProjectSummary>> {
        use crate::models::project::ProjectSummary as DbProjectSummary;
        use crate::schema::vw_resumo_projetos;

        let mut conn = self.conn()?;
        let rows = vw_resumo_projetos::table
            .order((
                vw_resumo_projetos::ano_base.desc(),
                vw_resumo_projetos::nome.asc(),
            ))
            .select(DbProjectSummary::as_select())
            .load::<DbProjectSummary>(&mut conn)?;

        let summaries = rows
            .into_iter()
            .map(ProjectSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        use crate::models::project::Project as DbProject;
        use crate::schema::projetos;

        let mut conn = self.conn()?;
        let rows = projetos::table
            .order((projetos::ano_base.desc(), projetos::nome.asc()))
            .select(DbProject::as_select())
            .load::<DbProject>(&mut conn)?;

        let projects = rows
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }
}
