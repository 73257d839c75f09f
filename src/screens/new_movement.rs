//! Movement creation form: reference data, one draft record and its insert.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::category::Category;
use crate::domain::movement::NewMovement;
use crate::domain::project::Project;
use crate::domain::types::{CategoryId, MovementId, MovementKind, ProjectId};
use crate::repository::errors::RepositoryResult;
use crate::screens::{Fetch, RequestId, RequestSeq, Screen, effect_panicked};

pub const INSERT_FAILED_ALERT: &str = "Falha ao criar o movimento. Verifique os dados e tente novamente.";

/// Field values of the record being created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovementForm {
    pub project_id: Option<ProjectId>,
    pub kind: MovementKind,
    pub date: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub amount: Option<Decimal>,
}

impl NewMovementForm {
    /// Blank form dated `today`, recording an outflow.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            project_id: None,
            kind: MovementKind::Outflow,
            date: Some(today),
            category_id: None,
            description: String::new(),
            amount: None,
        }
    }

    /// Whether every required field holds an acceptable value.
    pub fn is_submittable(&self) -> bool {
        self.to_new_movement().is_some()
    }

    /// Builds the insert payload, or `None` while the form is incomplete.
    pub fn to_new_movement(&self) -> Option<NewMovement> {
        let project_id = self.project_id?;
        let date = self.date?;
        let amount = self.amount.filter(|amount| *amount > Decimal::ZERO)?;
        if self.description.trim().is_empty() {
            return None;
        }
        Some(NewMovement::new(
            project_id,
            self.kind,
            date,
            self.category_id,
            &self.description,
            amount,
        ))
    }

    pub fn apply(&mut self, field: FormField) {
        match field {
            FormField::Project(project_id) => self.project_id = project_id,
            FormField::Kind(kind) => self.kind = kind,
            FormField::Date(date) => self.date = date,
            FormField::Category(category_id) => self.category_id = category_id,
            FormField::Description(description) => self.description = description,
            FormField::Amount(amount) => self.amount = amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Project(Option<ProjectId>),
    Kind(MovementKind),
    Date(Option<NaiveDate>),
    Category(Option<CategoryId>),
    Description(String),
    Amount(Option<Decimal>),
}

#[derive(Debug)]
pub struct NewMovementState {
    seq: RequestSeq,
    projects: Fetch<Vec<Project>>,
    categories: Fetch<Vec<Category>>,
    form: NewMovementForm,
    submitting: bool,
    created: Option<MovementId>,
    alert: Option<String>,
}

#[derive(Debug)]
pub enum NewMovementMsg {
    Mount,
    ProjectsLoaded(RequestId, RepositoryResult<Vec<Project>>),
    CategoriesLoaded(RequestId, RepositoryResult<Vec<Category>>),
    Edit(FormField),
    Submit,
    Inserted(RepositoryResult<MovementId>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewMovementEffect {
    LoadProjects(RequestId),
    LoadCategories(RequestId),
    Insert(NewMovement),
}

impl NewMovementState {
    pub fn new(form: NewMovementForm) -> Self {
        Self {
            seq: RequestSeq::default(),
            projects: Fetch::default(),
            categories: Fetch::default(),
            form,
            submitting: false,
            created: None,
            alert: None,
        }
    }

    pub fn projects(&self) -> &Fetch<Vec<Project>> {
        &self.projects
    }

    pub fn categories(&self) -> &Fetch<Vec<Category>> {
        &self.categories
    }

    pub fn form(&self) -> &NewMovementForm {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn created(&self) -> Option<MovementId> {
        self.created
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// List URL to navigate to once the insert succeeded.
    pub fn redirect_target(&self) -> Option<String> {
        self.created
            .map(|id| format!("/movimentos?created={id}"))
    }
}

impl Screen for NewMovementState {
    type Msg = NewMovementMsg;
    type Effect = NewMovementEffect;

    fn update(&mut self, msg: NewMovementMsg) -> Vec<NewMovementEffect> {
        match msg {
            NewMovementMsg::Mount => {
                let projects = self.projects.begin(&mut self.seq);
                let categories = self.categories.begin(&mut self.seq);
                vec![
                    NewMovementEffect::LoadProjects(projects),
                    NewMovementEffect::LoadCategories(categories),
                ]
            }
            NewMovementMsg::ProjectsLoaded(request, result) => {
                if self.projects.resolve(request, result, "projects")
                    && self.form.project_id.is_none()
                {
                    self.form.project_id = self.projects.items().first().map(|p| p.id);
                }
                vec![]
            }
            NewMovementMsg::CategoriesLoaded(request, result) => {
                self.categories.resolve(request, result, "categories");
                vec![]
            }
            NewMovementMsg::Edit(field) => {
                if !self.submitting {
                    self.form.apply(field);
                }
                vec![]
            }
            NewMovementMsg::Submit => {
                if self.submitting || self.created.is_some() {
                    return vec![];
                }
                match self.form.to_new_movement() {
                    Some(movement) => {
                        self.submitting = true;
                        self.alert = None;
                        vec![NewMovementEffect::Insert(movement)]
                    }
                    None => vec![],
                }
            }
            NewMovementMsg::Inserted(result) => {
                if !self.submitting {
                    return vec![];
                }
                self.submitting = false;
                match result {
                    Ok(id) => self.created = Some(id),
                    Err(err) => {
                        log::error!("Failed to insert movement: {err}");
                        self.alert = Some(INSERT_FAILED_ALERT.to_string());
                    }
                }
                vec![]
            }
        }
    }

    fn abandoned(effect: &NewMovementEffect) -> NewMovementMsg {
        match effect {
            NewMovementEffect::LoadProjects(request) => {
                NewMovementMsg::ProjectsLoaded(*request, Err(effect_panicked()))
            }
            NewMovementEffect::LoadCategories(request) => {
                NewMovementMsg::CategoriesLoaded(*request, Err(effect_panicked()))
            }
            NewMovementEffect::Insert(_) => NewMovementMsg::Inserted(Err(effect_panicked())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn project(id: i32, name: &str) -> Project {
        Project {
            id: ProjectId::new(id).unwrap(),
            name: name.to_string(),
            base_year: 2025,
        }
    }

    fn complete_form() -> NewMovementForm {
        NewMovementForm {
            project_id: Some(ProjectId::new(1).unwrap()),
            description: "Passagens".to_string(),
            amount: Some(Decimal::from(150)),
            ..NewMovementForm::new(today())
        }
    }

    fn mounted(projects: Vec<Project>) -> NewMovementState {
        let mut state = NewMovementState::new(NewMovementForm::new(today()));
        for effect in state.update(NewMovementMsg::Mount) {
            match effect {
                NewMovementEffect::LoadProjects(request) => {
                    state.update(NewMovementMsg::ProjectsLoaded(request, Ok(projects.clone())));
                }
                NewMovementEffect::LoadCategories(request) => {
                    state.update(NewMovementMsg::CategoriesLoaded(request, Ok(vec![])));
                }
                other => panic!("unexpected effect {other:?}"),
            }
        }
        state
    }

    #[test]
    fn new_form_defaults_to_outflow_today() {
        let form = NewMovementForm::new(today());

        assert_eq!(form.kind, MovementKind::Outflow);
        assert_eq!(form.date, Some(today()));
        assert!(!form.is_submittable());
    }

    #[test]
    fn amount_must_be_strictly_positive() {
        let mut form = complete_form();

        form.amount = Some(Decimal::ZERO);
        assert!(!form.is_submittable());
        form.amount = Some(Decimal::new(1, 2));
        assert!(form.is_submittable());
        form.amount = None;
        assert!(!form.is_submittable());
    }

    #[test]
    fn description_must_not_be_blank() {
        let mut form = complete_form();

        form.description = " ".to_string();
        assert!(!form.is_submittable());
        form.description = "x".to_string();
        assert!(form.is_submittable());
    }

    #[test]
    fn project_and_date_are_required() {
        let mut form = complete_form();
        form.project_id = None;
        assert!(!form.is_submittable());

        let mut form = complete_form();
        form.date = None;
        assert!(!form.is_submittable());
    }

    #[test]
    fn payload_trims_description() {
        let mut form = complete_form();
        form.description = "  Hospedagem ".to_string();

        let movement = form.to_new_movement().unwrap();

        assert_eq!(movement.description, "Hospedagem");
        assert_eq!(movement.amount, Decimal::from(150));
        assert_eq!(movement.date, today());
    }

    #[test]
    fn loaded_projects_default_the_selector_to_first() {
        let state = mounted(vec![project(7, "Oficinas"), project(3, "Feira")]);

        assert_eq!(state.form().project_id, Some(ProjectId::new(7).unwrap()));
    }

    #[test]
    fn failed_project_load_leaves_form_unsubmittable() {
        let mut state = NewMovementState::new(NewMovementForm::new(today()));
        let effects = state.update(NewMovementMsg::Mount);
        let request = match effects.first() {
            Some(NewMovementEffect::LoadProjects(request)) => *request,
            other => panic!("unexpected effect {other:?}"),
        };

        state.update(NewMovementMsg::ProjectsLoaded(
            request,
            Err(RepositoryError::ConnectionError("offline".into())),
        ));
        state.update(NewMovementMsg::Edit(FormField::Description("x".into())));
        state.update(NewMovementMsg::Edit(FormField::Amount(Some(Decimal::from(10)))));

        assert!(state.projects().items().is_empty());
        assert!(!state.form().is_submittable());
        assert!(state.update(NewMovementMsg::Submit).is_empty());
    }

    #[test]
    fn successful_insert_redirects_with_created_id() {
        let mut state = mounted(vec![project(1, "Oficinas")]);
        state.update(NewMovementMsg::Edit(FormField::Description("Lanche".into())));
        state.update(NewMovementMsg::Edit(FormField::Amount(Some(Decimal::new(425, 1)))));

        let effects = state.update(NewMovementMsg::Submit);
        assert!(matches!(effects.as_slice(), [NewMovementEffect::Insert(_)]));
        assert!(state.is_submitting());

        state.update(NewMovementMsg::Inserted(Ok(MovementId::new(31).unwrap())));

        assert_eq!(state.redirect_target().as_deref(), Some("/movimentos?created=31"));
    }

    #[test]
    fn failed_insert_keeps_values_and_alerts() {
        let mut state = mounted(vec![project(1, "Oficinas")]);
        state.update(NewMovementMsg::Edit(FormField::Description("Lanche".into())));
        state.update(NewMovementMsg::Edit(FormField::Amount(Some(Decimal::new(425, 1)))));
        state.update(NewMovementMsg::Submit);

        state.update(NewMovementMsg::Inserted(Err(RepositoryError::DatabaseError(
            "constraint".into(),
        ))));

        assert_eq!(state.alert(), Some(INSERT_FAILED_ALERT));
        assert_eq!(state.form().description, "Lanche");
        assert_eq!(state.form().amount, Some(Decimal::new(425, 1)));
        assert!(state.redirect_target().is_none());
        assert!(state.form().is_submittable());
    }
}
