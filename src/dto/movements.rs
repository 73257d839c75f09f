use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::movement::{MovementRow, MovementTotals};
use crate::domain::project::Project;
use crate::domain::types::{MovementId, MovementKind};
use crate::format::{format_brl, format_date_br};
use crate::screens::movement_list::{MovementDraft, MovementFilter};
use crate::screens::new_movement::NewMovementForm;

#[derive(Debug, Serialize)]
pub struct KindOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn kind_label(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Inflow => "Entrada",
        MovementKind::Outflow => "Saída",
    }
}

pub fn kind_options() -> Vec<KindOption> {
    MovementKind::ALL
        .iter()
        .map(|kind| KindOption {
            value: kind.as_str(),
            label: kind_label(*kind),
        })
        .collect()
}

/// Filter values echoed back into the filter form.
#[derive(Debug, Serialize)]
pub struct FilterView {
    pub project_id: Option<i32>,
    pub kind: Option<&'static str>,
    pub month: String,
    pub search: String,
    /// Query string reproducing the filters, without a leading `?`.
    pub query: String,
}

impl From<&MovementFilter> for FilterView {
    fn from(filter: &MovementFilter) -> Self {
        let month = filter.month.map(|month| month.to_string()).unwrap_or_default();
        let project_id = filter.project_id.map(|id| id.get());
        let kind = filter.kind.map(MovementKind::as_str);

        let mut pairs = Vec::new();
        if let Some(id) = project_id {
            pairs.push(("projeto_id", id.to_string()));
        }
        if let Some(kind) = kind {
            pairs.push(("tipo", kind.to_string()));
        }
        if !month.is_empty() {
            pairs.push(("mes", month.clone()));
        }
        if !filter.search.is_empty() {
            pairs.push(("q", filter.search.clone()));
        }
        let query = serde_html_form::to_string(&pairs).unwrap_or_default();

        Self {
            project_id,
            kind,
            month,
            search: filter.search.clone(),
            query,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub inflow: String,
    pub outflow: String,
    pub balance: String,
}

impl From<MovementTotals> for TotalsView {
    fn from(totals: MovementTotals) -> Self {
        Self {
            inflow: format_brl(totals.inflow),
            outflow: format_brl(totals.outflow),
            balance: format_brl(totals.balance),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovementRowView {
    pub id: MovementId,
    pub date: String,
    pub kind: String,
    /// `entrada`, `saida` or empty for unrecognised labels.
    pub kind_class: &'static str,
    pub project_name: String,
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub amount: String,
    pub status: Option<String>,
    pub created: bool,
}

impl MovementRowView {
    pub fn new(row: &MovementRow, created: Option<MovementId>) -> Self {
        Self {
            id: row.id,
            date: format_date_br(row.date),
            kind: row.kind.clone(),
            kind_class: match MovementKind::classify(&row.kind) {
                Some(MovementKind::Inflow) => "entrada",
                Some(MovementKind::Outflow) => "saida",
                None => "",
            },
            project_name: row.project_name.clone(),
            category_name: row.category_name.clone(),
            description: row.description.clone(),
            amount: format_brl(row.amount.unwrap_or_default()),
            status: row.status.clone(),
            created: created == Some(row.id),
        }
    }
}

/// Draft of the row being edited, in HTML input formats.
#[derive(Debug, Serialize)]
pub struct EditView {
    pub id: MovementId,
    pub kind: &'static str,
    pub date: String,
    pub project_id: i32,
    pub category_id: Option<i32>,
    pub description: String,
    pub amount: String,
    pub status: String,
}

impl EditView {
    pub fn new(id: MovementId, draft: &MovementDraft) -> Self {
        Self {
            id,
            kind: draft.kind.as_str(),
            date: draft.date.format("%Y-%m-%d").to_string(),
            project_id: draft.project_id.get(),
            category_id: draft.category_id.map(|id| id.get()),
            description: draft.description.clone(),
            amount: format!("{:.2}", draft.amount),
            status: draft.status.clone(),
        }
    }
}

/// Data required to render the movement list template.
#[derive(Debug, Serialize)]
pub struct MovementListPageData {
    pub filters: FilterView,
    pub projects: Vec<Project>,
    pub categories: Vec<Category>,
    pub kinds: Vec<KindOption>,
    pub rows: Vec<MovementRowView>,
    pub totals: TotalsView,
    pub loading: bool,
    pub editing: Option<EditView>,
    pub saving: bool,
    pub alert: Option<String>,
    pub created: Option<MovementId>,
    pub limit: i64,
}

/// Form values echoed back into the creation form.
#[derive(Debug, Serialize)]
pub struct NewMovementFormView {
    pub project_id: Option<i32>,
    pub kind: &'static str,
    pub date: String,
    pub category_id: Option<i32>,
    pub description: String,
    pub amount: String,
}

impl From<&NewMovementForm> for NewMovementFormView {
    fn from(form: &NewMovementForm) -> Self {
        Self {
            project_id: form.project_id.map(|id| id.get()),
            kind: form.kind.as_str(),
            date: form
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            category_id: form.category_id.map(|id| id.get()),
            description: form.description.clone(),
            amount: form.amount.map(|amount| amount.to_string()).unwrap_or_default(),
        }
    }
}

/// Data required to render the creation form template.
#[derive(Debug, Serialize)]
pub struct NewMovementPageData {
    pub projects: Vec<Project>,
    pub categories: Vec<Category>,
    pub kinds: Vec<KindOption>,
    pub form: NewMovementFormView,
    pub submittable: bool,
    pub alert: Option<String>,
}
