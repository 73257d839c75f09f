use crate::domain::types::ProjectId;
use crate::dto::dashboard::{
    CategoryRow, DashboardPageData, MonthlyChart, ProjectCards, ProjectOption,
};
use crate::repository::{ProjectReader, ReportReader};
use crate::screens::dashboard::{DashboardEffect, DashboardMsg, DashboardState};
use crate::screens::dispatch;

/// Runs one dashboard effect against the repository.
fn run_effect<R>(repo: &R, effect: DashboardEffect) -> DashboardMsg
where
    R: ProjectReader + ReportReader + ?Sized,
{
    match effect {
        DashboardEffect::LoadProjects(request) => {
            DashboardMsg::ProjectsLoaded(request, repo.list_project_summaries())
        }
        DashboardEffect::LoadMonthly(request, project_id) => {
            DashboardMsg::MonthlyLoaded(request, repo.list_monthly_totals(project_id))
        }
        DashboardEffect::LoadCategories(request, project_id) => {
            DashboardMsg::CategoriesLoaded(request, repo.list_category_execution(project_id))
        }
    }
}

/// Loads the dashboard for `preferred`, falling back to the first project.
///
/// Failed queries render as empty sections rather than failing the page.
pub fn load_dashboard_page<R>(repo: &R, preferred: Option<ProjectId>) -> DashboardPageData
where
    R: ProjectReader + ReportReader + Sync + ?Sized,
{
    let mut state = DashboardState::new(preferred);
    dispatch(&mut state, DashboardMsg::Mount, |effect| run_effect(repo, effect));

    build_page(&state)
}

fn build_page(state: &DashboardState) -> DashboardPageData {
    let selected = state.selected();
    let projects = state
        .projects()
        .items()
        .iter()
        .map(|project| ProjectOption {
            id: project.project_id,
            label: project.display_label(),
            selected: Some(project.project_id) == selected,
        })
        .collect();

    let monthly = state.monthly().items();
    let categories = state.categories().items();

    DashboardPageData {
        projects,
        projects_loading: state.projects().is_loading(),
        current: state.current_project().map(ProjectCards::from),
        chart: MonthlyChart::new(monthly),
        monthly_loading: state.monthly().is_loading(),
        monthly_empty: !state.monthly().is_loading() && monthly.is_empty(),
        categories: categories.iter().map(CategoryRow::from).collect(),
        categories_loading: state.categories().is_loading(),
        categories_empty: !state.categories().is_loading() && categories.is_empty(),
    }
}
