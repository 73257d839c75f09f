//! Movement list, inline edit, creation form and CSV export.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::MovementId;
use crate::dto::movements::{
    EditView, FilterView, MovementListPageData, MovementRowView, NewMovementFormView,
    NewMovementPageData, TotalsView, kind_options,
};
use crate::forms::movements::{MovementFilterQuery, NewMovementFormData, SaveMovementForm};
use crate::repository::{CategoryReader, MovementReader, MovementWriter, ProjectReader};
use crate::screens::movement_list::{
    EditState, MovementListEffect, MovementListMsg, MovementListState,
};
use crate::screens::new_movement::{
    NewMovementEffect, NewMovementForm, NewMovementMsg, NewMovementState,
};
use crate::screens::{Screen, dispatch};
use crate::services::{ServiceError, ServiceResult};

/// Alert shown when a posted creation form is incomplete.
pub const MISSING_FIELDS_ALERT: &str =
    "Preencha projeto, tipo, data, descrição e um valor maior que zero.";

fn run_list_effect<R>(repo: &R, effect: MovementListEffect) -> MovementListMsg
where
    R: ProjectReader + CategoryReader + MovementReader + MovementWriter + ?Sized,
{
    match effect {
        MovementListEffect::LoadProjects(request) => {
            MovementListMsg::ProjectsLoaded(request, repo.list_projects())
        }
        MovementListEffect::LoadCategories(request) => {
            MovementListMsg::CategoriesLoaded(request, repo.list_categories())
        }
        MovementListEffect::LoadRows(request, query) => {
            MovementListMsg::RowsLoaded(request, repo.list_movements(&query))
        }
        MovementListEffect::UpdateMovement(id, updates) => {
            MovementListMsg::Saved(repo.update_movement(id, &updates))
        }
    }
}

fn run_form_effect<R>(repo: &R, effect: NewMovementEffect) -> NewMovementMsg
where
    R: ProjectReader + CategoryReader + MovementWriter + ?Sized,
{
    match effect {
        NewMovementEffect::LoadProjects(request) => {
            NewMovementMsg::ProjectsLoaded(request, repo.list_projects())
        }
        NewMovementEffect::LoadCategories(request) => {
            NewMovementMsg::CategoriesLoaded(request, repo.list_categories())
        }
        NewMovementEffect::Insert(movement) => {
            NewMovementMsg::Inserted(repo.create_movement(&movement))
        }
    }
}

fn mount_list<R>(repo: &R, query: &MovementFilterQuery) -> MovementListState
where
    R: ProjectReader + CategoryReader + MovementReader + MovementWriter + Sync + ?Sized,
{
    let mut state = MovementListState::with_filter(query.to_filter());
    dispatch(&mut state, MovementListMsg::Mount, |effect| {
        run_list_effect(repo, effect)
    });
    state
}

fn build_list_page(state: &MovementListState, created: Option<MovementId>) -> MovementListPageData {
    let editing = match state.edit() {
        EditState::Viewing => None,
        EditState::Editing { id, draft } => Some(EditView::new(*id, draft)),
    };

    MovementListPageData {
        filters: FilterView::from(state.filter()),
        projects: state.projects().items().to_vec(),
        categories: state.categories().items().to_vec(),
        kinds: kind_options(),
        rows: state
            .rows()
            .items()
            .iter()
            .map(|row| MovementRowView::new(row, created))
            .collect(),
        totals: TotalsView::from(state.totals()),
        loading: state.rows().is_loading(),
        editing,
        saving: state.is_saving(),
        alert: state.alert().map(str::to_string),
        created,
        limit: state.filter().to_query().limit,
    }
}

/// Loads the filtered movement list, optionally with one row in edit mode.
pub fn load_movement_list<R>(repo: &R, query: &MovementFilterQuery) -> MovementListPageData
where
    R: ProjectReader + CategoryReader + MovementReader + MovementWriter + Sync + ?Sized,
{
    let mut state = mount_list(repo, query);
    if let Some(id) = query.editing() {
        state.update(MovementListMsg::StartEdit(id));
    }
    build_list_page(&state, query.created())
}

/// Result of saving an inline edit.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    /// The update failed; the page keeps the draft and carries an alert.
    Failed(MovementListPageData),
}

/// Applies the posted draft to movement `id` listed under `query`.
pub fn save_movement<R>(
    repo: &R,
    id: MovementId,
    query: &MovementFilterQuery,
    form: &SaveMovementForm,
) -> ServiceResult<SaveOutcome>
where
    R: ProjectReader + CategoryReader + MovementReader + MovementWriter + Sync + ?Sized,
{
    let fields = form.draft_fields().map_err(|err| {
        log::error!("Failed to read movement draft: {err}");
        err
    })?;

    let mut state = mount_list(repo, query);
    state.update(MovementListMsg::StartEdit(id));
    if matches!(state.edit(), EditState::Viewing) {
        return Err(ServiceError::NotFound);
    }
    for field in fields {
        state.update(MovementListMsg::EditField(field));
    }

    dispatch(&mut state, MovementListMsg::Save, |effect| {
        run_list_effect(repo, effect)
    });

    if state.alert().is_some() {
        return Ok(SaveOutcome::Failed(build_list_page(&state, None)));
    }
    Ok(SaveOutcome::Saved)
}

fn build_form_page(state: &NewMovementState, alert: Option<&str>) -> NewMovementPageData {
    NewMovementPageData {
        projects: state.projects().items().to_vec(),
        categories: state.categories().items().to_vec(),
        kinds: kind_options(),
        form: NewMovementFormView::from(state.form()),
        submittable: state.form().is_submittable(),
        alert: alert.map(str::to_string),
    }
}

fn mount_form<R>(repo: &R, today: NaiveDate) -> NewMovementState
where
    R: ProjectReader + CategoryReader + MovementWriter + Sync + ?Sized,
{
    let mut state = NewMovementState::new(NewMovementForm::new(today));
    dispatch(&mut state, NewMovementMsg::Mount, |effect| {
        run_form_effect(repo, effect)
    });
    state
}

/// Loads the blank creation form dated `today`.
pub fn load_new_movement_page<R>(repo: &R, today: NaiveDate) -> NewMovementPageData
where
    R: ProjectReader + CategoryReader + MovementWriter + Sync + ?Sized,
{
    let state = mount_form(repo, today);
    build_form_page(&state, None)
}

/// Result of posting the creation form.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(MovementId),
    /// Nothing was inserted; the page keeps the posted values.
    Rejected(NewMovementPageData),
}

pub fn create_movement<R>(
    repo: &R,
    today: NaiveDate,
    form: &NewMovementFormData,
) -> ServiceResult<CreateOutcome>
where
    R: ProjectReader + CategoryReader + MovementWriter + Sync + ?Sized,
{
    let fields = form.form_fields().map_err(|err| {
        log::error!("Failed to read new movement form: {err}");
        err
    })?;

    let mut state = mount_form(repo, today);
    for field in fields {
        state.update(NewMovementMsg::Edit(field));
    }

    if !state.form().is_submittable() {
        log::warn!("Rejected incomplete movement form");
        return Ok(CreateOutcome::Rejected(build_form_page(
            &state,
            Some(MISSING_FIELDS_ALERT),
        )));
    }

    dispatch(&mut state, NewMovementMsg::Submit, |effect| {
        run_form_effect(repo, effect)
    });

    match state.created() {
        Some(id) => Ok(CreateOutcome::Created(id)),
        None => Ok(CreateOutcome::Rejected(build_form_page(&state, state.alert()))),
    }
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    data: String,
    projeto: &'a str,
    tipo: &'a str,
    categoria: &'a str,
    descricao: &'a str,
    valor: String,
    status: &'a str,
}

/// Exports the movements matching `query` (same cap as the list) as CSV.
pub fn export_movements_csv<R>(repo: &R, query: &MovementFilterQuery) -> ServiceResult<String>
where
    R: MovementReader + ?Sized,
{
    let rows = repo
        .list_movements(&query.to_filter().to_query())
        .map_err(|err| {
            log::error!("Failed to list movements for export: {err}");
            err
        })?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &rows {
        writer
            .serialize(CsvRecord {
                data: row.date.format("%Y-%m-%d").to_string(),
                projeto: &row.project_name,
                tipo: &row.kind,
                categoria: row.category_name.as_deref().unwrap_or_default(),
                descricao: row.description.as_deref().unwrap_or_default(),
                valor: format!("{:.2}", row.amount.unwrap_or_default()),
                status: row.status.as_deref().unwrap_or_default(),
            })
            .map_err(|err| ServiceError::Internal(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ServiceError::Internal(err.to_string()))
}
