use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CategoryId, MovementId, MovementKind, ProjectId, YearMonth};
use crate::forms::FormError;
use crate::screens::movement_list::{DraftField, MovementFilter};
use crate::screens::new_movement::FormField;

/// Query string of the movement list, CSV export and JSON API.
///
/// Every value is read as text and parsed per field, so a malformed value
/// only drops its own filter and the others still apply.
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilterQuery {
    pub projeto_id: Option<String>,
    pub tipo: Option<String>,
    pub mes: Option<String>,
    pub q: Option<String>,
    /// Row to open in edit mode.
    pub editar: Option<String>,
    /// Movement just created by the new-movement form.
    pub created: Option<String>,
}

impl MovementFilterQuery {
    pub fn parse(query: &str) -> Result<Self, FormError> {
        Ok(serde_html_form::from_str(query)?)
    }

    pub fn to_filter(&self) -> MovementFilter {
        MovementFilter {
            project_id: id_param(self.projeto_id.as_deref()),
            kind: self.tipo.as_deref().and_then(|kind| kind.parse().ok()),
            month: self
                .mes
                .as_deref()
                .and_then(|month| month.parse::<YearMonth>().ok()),
            search: self.q.as_deref().unwrap_or_default().trim().to_string(),
        }
    }

    pub fn editing(&self) -> Option<MovementId> {
        id_param(self.editar.as_deref())
    }

    pub fn created(&self) -> Option<MovementId> {
        id_param(self.created.as_deref())
    }
}

/// Query string of the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub projeto: Option<i32>,
}

impl DashboardQuery {
    pub fn parse(query: &str) -> Result<Self, FormError> {
        Ok(serde_html_form::from_str(query)?)
    }

    pub fn project(&self) -> Option<ProjectId> {
        self.projeto.and_then(|id| ProjectId::new(id).ok())
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Inline edit of one listed movement.
pub struct SaveMovementForm {
    pub tipo: String,
    pub data_movimento: String,
    pub projeto_id: i32,
    pub categoria_gasto_id: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub descricao: String,
    pub valor_total: String,
    #[validate(length(min = 1, max = 40))]
    pub status: String,
}

impl SaveMovementForm {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        let form: Self = serde_html_form::from_bytes(body)?;
        form.validate()?;
        Ok(form)
    }

    /// Draft changes carried by the form, in field order.
    pub fn draft_fields(&self) -> Result<Vec<DraftField>, FormError> {
        let kind = self
            .tipo
            .parse::<MovementKind>()
            .map_err(|_| FormError::InvalidKind)?;
        let date = parse_date(&self.data_movimento)?.ok_or(FormError::InvalidDate)?;
        let project_id = ProjectId::new(self.projeto_id).map_err(|_| FormError::InvalidProjectId)?;
        let category_id = parse_category(self.categoria_gasto_id)?;
        let amount = parse_amount(&self.valor_total)?.ok_or(FormError::InvalidAmount)?;

        Ok(vec![
            DraftField::Kind(kind),
            DraftField::Date(date),
            DraftField::Project(project_id),
            DraftField::Category(category_id),
            DraftField::Description(self.descricao.clone()),
            DraftField::Amount(amount),
            DraftField::Status(self.status.trim().to_string()),
        ])
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Values posted by the new-movement form.
///
/// Every field may be missing; completeness is decided by the form screen.
pub struct NewMovementFormData {
    pub projeto_id: Option<i32>,
    pub tipo: Option<String>,
    pub data_movimento: Option<String>,
    pub categoria_gasto_id: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub descricao: String,
    pub valor_total: Option<String>,
}

impl NewMovementFormData {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        let form: Self = serde_html_form::from_bytes(body)?;
        form.validate()?;
        Ok(form)
    }

    pub fn form_fields(&self) -> Result<Vec<FormField>, FormError> {
        let kind = match self.tipo.as_deref() {
            Some(kind) => kind.parse().map_err(|_| FormError::InvalidKind)?,
            None => MovementKind::default(),
        };
        let date = match self.data_movimento.as_deref() {
            Some(date) => parse_date(date)?,
            None => None,
        };
        let amount = match self.valor_total.as_deref() {
            Some(amount) => parse_amount(amount)?,
            None => None,
        };

        Ok(vec![
            FormField::Project(self.projeto_id.and_then(|id| ProjectId::new(id).ok())),
            FormField::Kind(kind),
            FormField::Date(date),
            FormField::Category(parse_category(self.categoria_gasto_id)?),
            FormField::Description(self.descricao.clone()),
            FormField::Amount(amount),
        ])
    }
}

/// Positive id from a query value; anything else counts as absent.
fn id_param<T: TryFrom<i32>>(value: Option<&str>) -> Option<T> {
    let id = value?.trim().parse::<i32>().ok()?;
    T::try_from(id).ok()
}

/// Parses an HTML number input value; blank means unset.
fn parse_amount(value: &str) -> Result<Option<Decimal>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(value)
        .map(Some)
        .map_err(|_| FormError::InvalidAmount)
}

/// Parses an HTML date input value; blank means unset.
fn parse_date(value: &str) -> Result<Option<NaiveDate>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| FormError::InvalidDate)
}

fn parse_category(value: Option<i32>) -> Result<Option<CategoryId>, FormError> {
    value
        .map(CategoryId::new)
        .transpose()
        .map_err(|_| FormError::InvalidCategoryId)
}
