//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::category::Category;
use crate::domain::movement::{MovementRow, NewMovement, UpdateMovement};
use crate::domain::project::{Project, ProjectSummary};
use crate::domain::report::{CategoryExecution, MonthlyTotals};
use crate::domain::types::{MovementId, ProjectId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryReader, MovementListQuery, MovementReader, MovementWriter, ProjectReader,
    ReportReader,
};

mock! {
    pub Repository {}

    impl ProjectReader for Repository {
        fn list_project_summaries(&self) -> RepositoryResult<Vec<ProjectSummary>>;
        fn list_projects(&self) -> RepositoryResult<Vec<Project>>;
    }

    impl CategoryReader for Repository {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }

    impl ReportReader for Repository {
        fn list_monthly_totals(&self, project_id: ProjectId) -> RepositoryResult<Vec<MonthlyTotals>>;
        fn list_category_execution(
            &self,
            project_id: ProjectId,
        ) -> RepositoryResult<Vec<CategoryExecution>>;
    }

    impl MovementReader for Repository {
        fn list_movements(&self, query: &MovementListQuery) -> RepositoryResult<Vec<MovementRow>>;
        fn get_movement_by_id(&self, id: MovementId) -> RepositoryResult<Option<MovementRow>>;
    }

    impl MovementWriter for Repository {
        fn create_movement(&self, movement: &NewMovement) -> RepositoryResult<MovementId>;
        fn update_movement(&self, id: MovementId, updates: &UpdateMovement) -> RepositoryResult<()>;
    }
}
