use diesel::prelude::*;

use crate::domain::report::{CategoryExecution, MonthlyTotals};
use crate::domain::types::ProjectId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ReportReader};

impl ReportReader for DieselRepository {
    fn list_monthly_totals(&self, project_id: ProjectId) -> RepositoryResult<Vec<MonthlyTotals>> {
        use crate::models::report::MonthlyTotals as DbMonthlyTotals;
        use crate::schema::vw_executado_por_mes;

        let mut conn = self.conn()?;
        let rows = vw_executado_por_mes::table
            .filter(vw_executado_por_mes::projeto_id.eq(project_id.get()))
            .order(vw_executado_por_mes::mes.asc())
            .select(DbMonthlyTotals::as_select())
            .load::<DbMonthlyTotals>(&mut conn)?;

        let rows = rows
            .into_iter()
            .map(MonthlyTotals::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_category_execution(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<CategoryExecution>> {
        use crate::models::report::CategoryExecution as DbCategoryExecution;
        use crate::schema::vw_planejado_executado_categoria as categoria;

        let mut conn = self.conn()?;
        let rows = categoria::table
            .filter(categoria::projeto_id.eq(project_id.get()))
            .order((categoria::valor_planejado.desc(), categoria::categoria.asc()))
            .select(DbCategoryExecution::as_select())
            .load::<DbCategoryExecution>(&mut conn)?;

        let rows = rows
            .into_iter()
            .map(CategoryExecution::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
