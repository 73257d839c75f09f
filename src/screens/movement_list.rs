//! Movement list: filters, the filtered rows and inline editing of one row.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::category::Category;
use crate::domain::movement::{MovementRow, MovementTotals, UpdateMovement};
use crate::domain::project::Project;
use crate::domain::types::{
    CategoryId, DEFAULT_MOVEMENT_STATUS, MovementId, MovementKind, ProjectId, YearMonth,
};
use crate::repository::MovementListQuery;
use crate::repository::errors::RepositoryResult;
use crate::screens::{Fetch, RequestId, RequestSeq, Screen, effect_panicked};

/// Alert shown when an edited movement could not be saved.
pub const SAVE_FAILED_ALERT: &str = "Falha ao salvar o movimento. Tente novamente.";

/// Filters currently applied to the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementFilter {
    pub project_id: Option<ProjectId>,
    pub kind: Option<MovementKind>,
    pub month: Option<YearMonth>,
    /// Applied description search; typing alone does not change it.
    pub search: String,
}

impl MovementFilter {
    pub fn to_query(&self) -> MovementListQuery {
        let mut query = MovementListQuery::new().search(&self.search);
        if let Some(project_id) = self.project_id {
            query = query.project(project_id);
        }
        if let Some(kind) = self.kind {
            query = query.kind(kind);
        }
        if let Some(month) = self.month {
            query = query.month(month);
        }
        query
    }
}

/// Editable copy of one listed movement.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub kind: MovementKind,
    pub date: NaiveDate,
    pub project_id: ProjectId,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub amount: Decimal,
    pub status: String,
}

impl MovementDraft {
    pub fn from_row(row: &MovementRow) -> Self {
        Self {
            kind: MovementKind::classify(&row.kind).unwrap_or_default(),
            date: row.date,
            project_id: row.project_id,
            category_id: row.category_id,
            description: row.description.clone().unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
            status: row
                .status
                .clone()
                .filter(|status| !status.is_empty())
                .unwrap_or_else(|| DEFAULT_MOVEMENT_STATUS.to_string()),
        }
    }

    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Kind(kind) => self.kind = kind,
            DraftField::Date(date) => self.date = date,
            DraftField::Project(project_id) => self.project_id = project_id,
            DraftField::Category(category_id) => self.category_id = category_id,
            DraftField::Description(description) => self.description = description,
            DraftField::Amount(amount) => self.amount = amount,
            DraftField::Status(status) => self.status = status,
        }
    }

    pub fn to_update(&self) -> UpdateMovement {
        UpdateMovement {
            project_id: self.project_id,
            kind: self.kind,
            date: self.date,
            category_id: self.category_id,
            description: self.description.clone(),
            amount: self.amount,
            status: self.status.clone(),
        }
    }
}

/// One field change of the edit draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Kind(MovementKind),
    Date(NaiveDate),
    Project(ProjectId),
    Category(Option<CategoryId>),
    Description(String),
    Amount(Decimal),
    Status(String),
}

/// At most one row is edited at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        id: MovementId,
        draft: MovementDraft,
    },
}

#[derive(Debug, Default)]
pub struct MovementListState {
    seq: RequestSeq,
    filter: MovementFilter,
    search_input: String,
    projects: Fetch<Vec<Project>>,
    categories: Fetch<Vec<Category>>,
    rows: Fetch<Vec<MovementRow>>,
    edit: EditState,
    saving: bool,
    alert: Option<String>,
}

#[derive(Debug)]
pub enum MovementListMsg {
    Mount,
    ProjectsLoaded(RequestId, RepositoryResult<Vec<Project>>),
    CategoriesLoaded(RequestId, RepositoryResult<Vec<Category>>),
    SetProject(Option<ProjectId>),
    SetKind(Option<MovementKind>),
    SetMonth(Option<YearMonth>),
    /// Updates the search box without querying.
    SetSearchText(String),
    /// Applies the search box to the list.
    ApplySearch,
    RowsLoaded(RequestId, RepositoryResult<Vec<MovementRow>>),
    StartEdit(MovementId),
    EditField(DraftField),
    CancelEdit,
    Save,
    Saved(RepositoryResult<()>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MovementListEffect {
    LoadProjects(RequestId),
    LoadCategories(RequestId),
    LoadRows(RequestId, MovementListQuery),
    UpdateMovement(MovementId, UpdateMovement),
}

impl MovementListState {
    /// Creates the screen with filters already chosen, e.g. from a URL.
    pub fn with_filter(filter: MovementFilter) -> Self {
        Self {
            search_input: filter.search.clone(),
            filter,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &MovementFilter {
        &self.filter
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn projects(&self) -> &Fetch<Vec<Project>> {
        &self.projects
    }

    pub fn categories(&self) -> &Fetch<Vec<Category>> {
        &self.categories
    }

    pub fn rows(&self) -> &Fetch<Vec<MovementRow>> {
        &self.rows
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Totals over the rows currently listed.
    pub fn totals(&self) -> MovementTotals {
        MovementTotals::from_rows(self.rows.items())
    }

    fn reload(&mut self) -> Vec<MovementListEffect> {
        let request = self.rows.begin(&mut self.seq);
        vec![MovementListEffect::LoadRows(request, self.filter.to_query())]
    }

    /// Applies a filter change, reloading only when the value differs.
    fn refilter(&mut self, change: impl FnOnce(&mut MovementFilter)) -> Vec<MovementListEffect> {
        let before = self.filter.clone();
        change(&mut self.filter);
        if self.filter == before {
            vec![]
        } else {
            self.reload()
        }
    }
}

impl Screen for MovementListState {
    type Msg = MovementListMsg;
    type Effect = MovementListEffect;

    fn update(&mut self, msg: MovementListMsg) -> Vec<MovementListEffect> {
        match msg {
            MovementListMsg::Mount => {
                let projects = self.projects.begin(&mut self.seq);
                let categories = self.categories.begin(&mut self.seq);
                let mut effects = vec![
                    MovementListEffect::LoadProjects(projects),
                    MovementListEffect::LoadCategories(categories),
                ];
                effects.extend(self.reload());
                effects
            }
            MovementListMsg::ProjectsLoaded(request, result) => {
                self.projects.resolve(request, result, "projects");
                vec![]
            }
            MovementListMsg::CategoriesLoaded(request, result) => {
                self.categories.resolve(request, result, "categories");
                vec![]
            }
            MovementListMsg::SetProject(project_id) => {
                self.refilter(|filter| filter.project_id = project_id)
            }
            MovementListMsg::SetKind(kind) => self.refilter(|filter| filter.kind = kind),
            MovementListMsg::SetMonth(month) => self.refilter(|filter| filter.month = month),
            MovementListMsg::SetSearchText(text) => {
                self.search_input = text;
                vec![]
            }
            MovementListMsg::ApplySearch => {
                self.filter.search = self.search_input.trim().to_string();
                self.reload()
            }
            MovementListMsg::RowsLoaded(request, result) => {
                self.rows.resolve(request, result, "movements");
                vec![]
            }
            MovementListMsg::StartEdit(id) => {
                if self.saving {
                    return vec![];
                }
                if let Some(row) = self.rows.items().iter().find(|row| row.id == id) {
                    self.edit = EditState::Editing {
                        id,
                        draft: MovementDraft::from_row(row),
                    };
                    self.alert = None;
                }
                vec![]
            }
            MovementListMsg::EditField(field) => {
                if let EditState::Editing { draft, .. } = &mut self.edit {
                    draft.apply(field);
                }
                vec![]
            }
            MovementListMsg::CancelEdit => {
                if !self.saving {
                    self.edit = EditState::Viewing;
                }
                vec![]
            }
            MovementListMsg::Save => match &self.edit {
                EditState::Editing { id, draft } if !self.saving => {
                    self.saving = true;
                    self.alert = None;
                    vec![MovementListEffect::UpdateMovement(*id, draft.to_update())]
                }
                _ => vec![],
            },
            MovementListMsg::Saved(result) => {
                if !self.saving {
                    return vec![];
                }
                self.saving = false;
                match result {
                    Ok(()) => {
                        self.edit = EditState::Viewing;
                        self.reload()
                    }
                    Err(err) => {
                        log::error!("Failed to save movement: {err}");
                        self.alert = Some(SAVE_FAILED_ALERT.to_string());
                        vec![]
                    }
                }
            }
        }
    }

    fn abandoned(effect: &MovementListEffect) -> MovementListMsg {
        match effect {
            MovementListEffect::LoadProjects(request) => {
                MovementListMsg::ProjectsLoaded(*request, Err(effect_panicked()))
            }
            MovementListEffect::LoadCategories(request) => {
                MovementListMsg::CategoriesLoaded(*request, Err(effect_panicked()))
            }
            MovementListEffect::LoadRows(request, _) => {
                MovementListMsg::RowsLoaded(*request, Err(effect_panicked()))
            }
            MovementListEffect::UpdateMovement(..) => MovementListMsg::Saved(Err(effect_panicked())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movement::fixtures::movement_row;
    use crate::repository::errors::RepositoryError;

    fn mounted(filter: MovementFilter, rows: Vec<MovementRow>) -> MovementListState {
        let mut state = MovementListState::with_filter(filter);
        let effects = state.update(MovementListMsg::Mount);
        for effect in effects {
            match effect {
                MovementListEffect::LoadProjects(request) => {
                    state.update(MovementListMsg::ProjectsLoaded(request, Ok(vec![])));
                }
                MovementListEffect::LoadCategories(request) => {
                    state.update(MovementListMsg::CategoriesLoaded(request, Ok(vec![])));
                }
                MovementListEffect::LoadRows(request, _) => {
                    state.update(MovementListMsg::RowsLoaded(request, Ok(rows.clone())));
                }
                other => panic!("unexpected effect {other:?}"),
            }
        }
        state
    }

    fn single_load(effects: &[MovementListEffect]) -> (RequestId, MovementListQuery) {
        match effects {
            [MovementListEffect::LoadRows(request, query)] => (*request, query.clone()),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    fn id(value: i32) -> MovementId {
        MovementId::new(value).unwrap()
    }

    #[test]
    fn mount_loads_references_and_rows_with_filter() {
        let project = ProjectId::new(3).unwrap();
        let filter = MovementFilter {
            project_id: Some(project),
            month: Some("2025-02".parse().unwrap()),
            ..MovementFilter::default()
        };
        let mut state = MovementListState::with_filter(filter);

        let effects = state.update(MovementListMsg::Mount);

        assert_eq!(effects.len(), 3);
        match &effects[2] {
            MovementListEffect::LoadRows(_, query) => {
                assert_eq!(query.project_id, Some(project));
                assert_eq!(query.limit, 200);
                assert!(query.search.is_none());
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn filter_changes_reload_only_when_value_differs() {
        let mut state = mounted(MovementFilter::default(), vec![]);

        let (_, query) = single_load(&state.update(MovementListMsg::SetKind(Some(
            MovementKind::Inflow,
        ))));
        assert_eq!(query.kind, Some(MovementKind::Inflow));

        assert!(
            state
                .update(MovementListMsg::SetKind(Some(MovementKind::Inflow)))
                .is_empty()
        );
    }

    #[test]
    fn typing_search_does_not_query_until_applied() {
        let mut state = mounted(MovementFilter::default(), vec![]);

        assert!(
            state
                .update(MovementListMsg::SetSearchText("  diária ".into()))
                .is_empty()
        );
        let (_, query) = single_load(&state.update(MovementListMsg::ApplySearch));

        assert_eq!(query.search.as_deref(), Some("diária"));
        assert_eq!(state.filter().search, "diária");
    }

    #[test]
    fn stale_rows_are_discarded() {
        let mut state = mounted(MovementFilter::default(), vec![]);
        let (first, _) = single_load(&state.update(MovementListMsg::SetMonth(Some(
            "2025-01".parse().unwrap(),
        ))));
        let (second, _) = single_load(&state.update(MovementListMsg::SetMonth(Some(
            "2025-02".parse().unwrap(),
        ))));

        state.update(MovementListMsg::RowsLoaded(
            second,
            Ok(vec![movement_row(2, "SAIDA", "2025-02-10", 10.0)]),
        ));
        state.update(MovementListMsg::RowsLoaded(
            first,
            Ok(vec![movement_row(1, "SAIDA", "2025-01-10", 99.0)]),
        ));

        assert_eq!(state.rows().items().len(), 1);
        assert_eq!(state.rows().items()[0].id, id(2));
    }

    #[test]
    fn failed_load_resets_rows_and_totals() {
        let mut state = mounted(
            MovementFilter::default(),
            vec![movement_row(1, "ENTRADA", "2025-02-10", 10.0)],
        );
        let (request, _) = single_load(&state.update(MovementListMsg::ApplySearch));

        state.update(MovementListMsg::RowsLoaded(
            request,
            Err(RepositoryError::DatabaseError("timeout".into())),
        ));

        assert!(state.rows().items().is_empty());
        assert_eq!(state.totals(), MovementTotals::default());
    }

    #[test]
    fn totals_follow_loaded_rows() {
        let state = mounted(
            MovementFilter::default(),
            vec![
                movement_row(1, "ENTRADA", "2025-02-10", 500.0),
                movement_row(2, "SAIDA", "2025-02-11", 120.0),
            ],
        );

        let totals = state.totals();

        assert_eq!(totals.inflow, Decimal::from(500));
        assert_eq!(totals.outflow, Decimal::from(120));
        assert_eq!(totals.balance, Decimal::from(380));
    }

    #[test]
    fn starting_new_edit_discards_previous_draft() {
        let mut state = mounted(
            MovementFilter::default(),
            vec![
                movement_row(1, "SAIDA", "2025-02-10", 10.0),
                movement_row(2, "SAIDA", "2025-02-11", 20.0),
            ],
        );

        state.update(MovementListMsg::StartEdit(id(1)));
        state.update(MovementListMsg::EditField(DraftField::Amount(Decimal::from(999))));
        state.update(MovementListMsg::StartEdit(id(2)));

        match state.edit() {
            EditState::Editing { id: editing, draft } => {
                assert_eq!(*editing, id(2));
                assert_eq!(draft.amount, Decimal::from(20));
            }
            other => panic!("unexpected edit state {other:?}"),
        }
    }

    #[test]
    fn edit_then_cancel_leaves_rows_untouched() {
        let rows = vec![movement_row(1, "SAIDA", "2025-02-10", 10.0)];
        let mut state = mounted(MovementFilter::default(), rows.clone());

        state.update(MovementListMsg::StartEdit(id(1)));
        state.update(MovementListMsg::EditField(DraftField::Description(
            "alterado".into(),
        )));
        state.update(MovementListMsg::EditField(DraftField::Amount(Decimal::ONE)));
        state.update(MovementListMsg::CancelEdit);

        assert_eq!(state.edit(), &EditState::Viewing);
        assert_eq!(state.rows().items(), rows.as_slice());
    }

    #[test]
    fn starting_edit_for_unlisted_row_is_ignored() {
        let mut state = mounted(MovementFilter::default(), vec![]);

        state.update(MovementListMsg::StartEdit(id(42)));

        assert_eq!(state.edit(), &EditState::Viewing);
    }

    #[test]
    fn save_submits_draft_and_reloads_on_success() {
        let mut state = mounted(
            MovementFilter::default(),
            vec![movement_row(1, "SAIDA", "2025-02-10", 10.0)],
        );
        state.update(MovementListMsg::StartEdit(id(1)));
        state.update(MovementListMsg::EditField(DraftField::Amount(Decimal::new(155, 1))));

        let effects = state.update(MovementListMsg::Save);
        let update = match effects.as_slice() {
            [MovementListEffect::UpdateMovement(target, update)] => {
                assert_eq!(*target, id(1));
                update.clone()
            }
            other => panic!("unexpected effects: {other:?}"),
        };
        assert_eq!(update.amount, Decimal::new(155, 1));
        assert_eq!(update.status, DEFAULT_MOVEMENT_STATUS);
        assert!(state.is_saving());

        let (_, _) = single_load(&state.update(MovementListMsg::Saved(Ok(()))));
        assert_eq!(state.edit(), &EditState::Viewing);
        assert!(!state.is_saving());
    }

    #[test]
    fn failed_save_keeps_draft_and_alerts() {
        let mut state = mounted(
            MovementFilter::default(),
            vec![movement_row(1, "SAIDA", "2025-02-10", 10.0)],
        );
        state.update(MovementListMsg::StartEdit(id(1)));
        state.update(MovementListMsg::EditField(DraftField::Amount(Decimal::new(155, 1))));
        state.update(MovementListMsg::Save);

        let effects = state.update(MovementListMsg::Saved(Err(
            RepositoryError::ConstraintViolation("check".into()),
        )));

        assert!(effects.is_empty());
        assert_eq!(state.alert(), Some(SAVE_FAILED_ALERT));
        match state.edit() {
            EditState::Editing { draft, .. } => assert_eq!(draft.amount, Decimal::new(155, 1)),
            other => panic!("unexpected edit state {other:?}"),
        }
    }

    #[test]
    fn save_without_edit_does_nothing() {
        let mut state = mounted(MovementFilter::default(), vec![]);

        assert!(state.update(MovementListMsg::Save).is_empty());
        assert!(state.update(MovementListMsg::Saved(Ok(()))).is_empty());
    }
}
