use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::movement::{MovementRow, NewMovement, UpdateMovement};
use crate::domain::project::{Project, ProjectSummary};
use crate::domain::report::{CategoryExecution, MonthlyTotals};
use crate::domain::types::{MovementId, MovementKind, ProjectId, YearMonth};
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod movement;
pub mod project;
pub mod report;

/// Upper bound on the number of movements returned by a list query.
pub const MOVEMENT_LIST_LIMIT: i64 = 200;

/// Filters applied to `vw_movimentos_lista`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementListQuery {
    pub project_id: Option<ProjectId>,
    pub kind: Option<MovementKind>,
    pub month: Option<YearMonth>,
    pub search: Option<String>,
    pub limit: i64,
}

impl Default for MovementListQuery {
    fn default() -> Self {
        Self {
            project_id: None,
            kind: None,
            month: None,
            search: None,
            limit: MOVEMENT_LIST_LIMIT,
        }
    }
}

impl MovementListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the description search; blank terms are ignored.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Clone)]
/// Diesel-backed repository sharing one connection pool across all readers and writers.
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

pub trait ProjectReader {
    /// Rows of `vw_resumo_projetos`, newest base year first, then by name.
    fn list_project_summaries(&self) -> RepositoryResult<Vec<ProjectSummary>>;
    /// Plain project list for selectors, same ordering as the summaries.
    fn list_projects(&self) -> RepositoryResult<Vec<Project>>;
}

pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

pub trait ReportReader {
    /// Monthly inflow/outflow sums of a project, oldest month first.
    fn list_monthly_totals(&self, project_id: ProjectId) -> RepositoryResult<Vec<MonthlyTotals>>;
    /// Planned versus executed per category, largest plan first.
    fn list_category_execution(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<CategoryExecution>>;
}

pub trait MovementReader {
    fn list_movements(&self, query: &MovementListQuery) -> RepositoryResult<Vec<MovementRow>>;
    fn get_movement_by_id(&self, id: MovementId) -> RepositoryResult<Option<MovementRow>>;
}

pub trait MovementWriter {
    fn create_movement(&self, movement: &NewMovement) -> RepositoryResult<MovementId>;
    fn update_movement(&self, id: MovementId, updates: &UpdateMovement) -> RepositoryResult<()>;
}
