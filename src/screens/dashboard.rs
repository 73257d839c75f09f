//! Dashboard: project summaries plus two aggregates of the selected project.

use crate::domain::project::ProjectSummary;
use crate::domain::report::{CategoryExecution, MonthlyTotals};
use crate::domain::types::ProjectId;
use crate::repository::errors::RepositoryResult;
use crate::screens::{Fetch, RequestId, RequestSeq, Screen, effect_panicked};

#[derive(Debug, Default)]
pub struct DashboardState {
    seq: RequestSeq,
    projects: Fetch<Vec<ProjectSummary>>,
    selected: Option<ProjectId>,
    monthly: Fetch<Vec<MonthlyTotals>>,
    categories: Fetch<Vec<CategoryExecution>>,
}

#[derive(Debug)]
pub enum DashboardMsg {
    Mount,
    ProjectsLoaded(RequestId, RepositoryResult<Vec<ProjectSummary>>),
    SelectProject(ProjectId),
    MonthlyLoaded(RequestId, RepositoryResult<Vec<MonthlyTotals>>),
    CategoriesLoaded(RequestId, RepositoryResult<Vec<CategoryExecution>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEffect {
    LoadProjects(RequestId),
    LoadMonthly(RequestId, ProjectId),
    LoadCategories(RequestId, ProjectId),
}

impl DashboardState {
    /// Creates the screen remembering a preferred project, which is honoured
    /// once the project list confirms it exists.
    pub fn new(preferred: Option<ProjectId>) -> Self {
        Self {
            selected: preferred,
            ..Self::default()
        }
    }

    pub fn projects(&self) -> &Fetch<Vec<ProjectSummary>> {
        &self.projects
    }

    pub fn monthly(&self) -> &Fetch<Vec<MonthlyTotals>> {
        &self.monthly
    }

    pub fn categories(&self) -> &Fetch<Vec<CategoryExecution>> {
        &self.categories
    }

    pub fn selected(&self) -> Option<ProjectId> {
        self.selected
    }

    pub fn current_project(&self) -> Option<&ProjectSummary> {
        let selected = self.selected?;
        self.projects
            .items()
            .iter()
            .find(|project| project.project_id == selected)
    }

    fn knows_project(&self, id: ProjectId) -> bool {
        self.projects
            .items()
            .iter()
            .any(|project| project.project_id == id)
    }

    /// Issues both dependent fetches for `project_id`; nothing is cached.
    fn load_dependents(&mut self, project_id: ProjectId) -> Vec<DashboardEffect> {
        let monthly = self.monthly.begin(&mut self.seq);
        let categories = self.categories.begin(&mut self.seq);
        vec![
            DashboardEffect::LoadMonthly(monthly, project_id),
            DashboardEffect::LoadCategories(categories, project_id),
        ]
    }
}

impl Screen for DashboardState {
    type Msg = DashboardMsg;
    type Effect = DashboardEffect;

    fn update(&mut self, msg: DashboardMsg) -> Vec<DashboardEffect> {
        match msg {
            DashboardMsg::Mount => {
                let request = self.projects.begin(&mut self.seq);
                vec![DashboardEffect::LoadProjects(request)]
            }
            DashboardMsg::ProjectsLoaded(request, result) => {
                if !self.projects.resolve(request, result, "project summaries") {
                    return vec![];
                }

                let selection = self
                    .selected
                    .filter(|id| self.knows_project(*id))
                    .or_else(|| self.projects.items().first().map(|p| p.project_id));
                self.selected = selection;

                match selection {
                    Some(project_id) => self.load_dependents(project_id),
                    None => vec![],
                }
            }
            DashboardMsg::SelectProject(project_id) => {
                if self.selected == Some(project_id) || !self.knows_project(project_id) {
                    return vec![];
                }
                self.selected = Some(project_id);
                self.load_dependents(project_id)
            }
            DashboardMsg::MonthlyLoaded(request, result) => {
                self.monthly.resolve(request, result, "monthly totals");
                vec![]
            }
            DashboardMsg::CategoriesLoaded(request, result) => {
                self.categories
                    .resolve(request, result, "category execution");
                vec![]
            }
        }
    }

    fn abandoned(effect: &DashboardEffect) -> DashboardMsg {
        match effect {
            DashboardEffect::LoadProjects(request) => {
                DashboardMsg::ProjectsLoaded(*request, Err(effect_panicked()))
            }
            DashboardEffect::LoadMonthly(request, _) => {
                DashboardMsg::MonthlyLoaded(*request, Err(effect_panicked()))
            }
            DashboardEffect::LoadCategories(request, _) => {
                DashboardMsg::CategoriesLoaded(*request, Err(effect_panicked()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::screens::dispatch;

    fn summary(id: i32, name: &str, year: i32) -> ProjectSummary {
        ProjectSummary {
            project_id: ProjectId::new(id).unwrap(),
            name: name.to_string(),
            base_year: year,
            program_line: None,
            total_planned: Decimal::from(1000),
            total_executed: Decimal::from(250),
            total_inflow: Decimal::from(1000),
            planned_balance: Decimal::from(750),
        }
    }

    fn monthly(month: u32) -> MonthlyTotals {
        MonthlyTotals {
            month: NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
            inflow: Decimal::from(100),
            outflow: Decimal::from(40),
        }
    }

    fn project_request(effects: &[DashboardEffect]) -> RequestId {
        match effects {
            [DashboardEffect::LoadProjects(request)] => *request,
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    fn dependent_requests(effects: &[DashboardEffect]) -> (RequestId, RequestId, ProjectId) {
        match effects {
            [
                DashboardEffect::LoadMonthly(monthly, project),
                DashboardEffect::LoadCategories(categories, other),
            ] if project == other => (*monthly, *categories, *project),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn mount_selects_first_project_and_loads_dependents() {
        let mut state = DashboardState::new(None);
        let request = project_request(&state.update(DashboardMsg::Mount));
        assert!(state.projects().is_loading());

        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025), summary(1, "Antigo", 2024)]),
        ));

        let (_, _, project) = dependent_requests(&effects);
        assert_eq!(project.get(), 2);
        assert_eq!(state.current_project().unwrap().name, "Atual");
        assert!(state.monthly().is_loading());
        assert!(state.categories().is_loading());
    }

    #[test]
    fn preferred_project_is_kept_when_listed() {
        let mut state = DashboardState::new(Some(ProjectId::new(1).unwrap()));
        let request = project_request(&state.update(DashboardMsg::Mount));

        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025), summary(1, "Antigo", 2024)]),
        ));

        assert_eq!(dependent_requests(&effects).2.get(), 1);
    }

    #[test]
    fn unknown_preferred_project_falls_back_to_first() {
        let mut state = DashboardState::new(Some(ProjectId::new(99).unwrap()));
        let request = project_request(&state.update(DashboardMsg::Mount));

        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025)]),
        ));

        assert_eq!(dependent_requests(&effects).2.get(), 2);
    }

    #[test]
    fn failed_project_list_leaves_no_selection() {
        let mut state = DashboardState::new(None);
        let request = project_request(&state.update(DashboardMsg::Mount));

        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Err(RepositoryError::ConnectionError("down".into())),
        ));

        assert!(effects.is_empty());
        assert!(state.projects().is_errored());
        assert!(state.current_project().is_none());
    }

    #[test]
    fn one_dependent_failure_does_not_affect_the_other() {
        let mut state = DashboardState::new(None);
        let request = project_request(&state.update(DashboardMsg::Mount));
        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025)]),
        ));
        let (monthly_request, categories_request, _) = dependent_requests(&effects);

        state.update(DashboardMsg::CategoriesLoaded(
            categories_request,
            Err(RepositoryError::DatabaseError("no such view".into())),
        ));
        state.update(DashboardMsg::MonthlyLoaded(
            monthly_request,
            Ok(vec![monthly(1), monthly(2)]),
        ));

        assert!(state.categories().is_errored());
        assert!(state.categories().items().is_empty());
        assert_eq!(state.monthly().items().len(), 2);
    }

    #[test]
    fn panicking_query_resolves_its_slice_as_errored() {
        let mut state = DashboardState::new(None);

        dispatch(&mut state, DashboardMsg::Mount, |effect| match effect {
            DashboardEffect::LoadProjects(request) => {
                DashboardMsg::ProjectsLoaded(request, Ok(vec![summary(2, "Atual", 2025)]))
            }
            DashboardEffect::LoadMonthly(..) => panic!("connection dropped"),
            DashboardEffect::LoadCategories(request, _) => {
                DashboardMsg::CategoriesLoaded(request, Ok(vec![]))
            }
        });

        assert!(state.monthly().is_errored());
        assert!(!state.monthly().is_loading());
        assert!(!state.categories().is_errored());
        assert_eq!(state.current_project().unwrap().name, "Atual");
    }

    #[test]
    fn switching_projects_discards_late_responses_for_previous_one() {
        let mut state = DashboardState::new(None);
        let request = project_request(&state.update(DashboardMsg::Mount));
        let effects = state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025), summary(1, "Antigo", 2024)]),
        ));
        let (old_monthly, _, _) = dependent_requests(&effects);

        let effects = state.update(DashboardMsg::SelectProject(ProjectId::new(1).unwrap()));
        let (new_monthly, _, project) = dependent_requests(&effects);
        assert_eq!(project.get(), 1);

        state.update(DashboardMsg::MonthlyLoaded(new_monthly, Ok(vec![monthly(3)])));
        state.update(DashboardMsg::MonthlyLoaded(
            old_monthly,
            Ok(vec![monthly(1), monthly(2)]),
        ));

        assert_eq!(state.monthly().items(), &[monthly(3)]);
    }

    #[test]
    fn reselecting_current_or_unknown_project_is_a_no_op() {
        let mut state = DashboardState::new(None);
        let request = project_request(&state.update(DashboardMsg::Mount));
        state.update(DashboardMsg::ProjectsLoaded(
            request,
            Ok(vec![summary(2, "Atual", 2025)]),
        ));

        assert!(
            state
                .update(DashboardMsg::SelectProject(ProjectId::new(2).unwrap()))
                .is_empty()
        );
        assert!(
            state
                .update(DashboardMsg::SelectProject(ProjectId::new(5).unwrap()))
                .is_empty()
        );
    }
}
