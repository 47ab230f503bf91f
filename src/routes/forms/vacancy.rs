use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use super::into_form_errors;
use crate::{
    dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancyListQuery},
    error::Result,
    models::{
        company::Company,
        vacancy::{EmploymentType, Vacancy, VacancyStatus},
    },
    utils::{
        time::{format_datetime_local, parse_datetime},
        validation::FieldErrors,
    },
    views::{
        lists::VacancyListView, render_rejected, render_template, ConfirmDeleteView, FieldView,
        FormView,
    },
    AppState,
};

const LIST_URL: &str = "/vacancies";

/// Raw form fields; everything arrives as text and is parsed in [`VacancyForm::parse`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VacancyForm {
    pub company: String,
    pub title: String,
    pub requirements: String,
    pub description: String,
    pub salary: String,
    pub employment_type: String,
    pub schedule: String,
    pub location: String,
    pub status: String,
    pub published_at: String,
    pub closed_at: String,
}

impl VacancyForm {
    fn from_vacancy(vacancy: &Vacancy) -> Self {
        Self {
            company: vacancy.company_id.to_string(),
            title: vacancy.title.clone(),
            requirements: vacancy.requirements.clone(),
            description: vacancy.description.clone(),
            salary: vacancy.salary.to_string(),
            employment_type: vacancy.employment_type.as_str().to_string(),
            schedule: vacancy.schedule.clone(),
            location: vacancy.location.clone(),
            status: vacancy.status.as_str().to_string(),
            published_at: format_datetime_local(vacancy.published_at),
            closed_at: vacancy
                .closed_at
                .map(format_datetime_local)
                .unwrap_or_default(),
        }
    }

    pub fn parse(&self) -> std::result::Result<CreateVacancyPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let company = Uuid::parse_str(self.company.trim()).map_err(|_| {
            errors.add("company", "Select a valid company");
        });
        let salary = self.salary.trim().parse::<i64>().map_err(|_| {
            errors.add("salary", "Enter a whole number");
        });
        let employment_type = parse_choice::<EmploymentType>(&self.employment_type)
            .map_err(|_| errors.add("employment_type", "Select a valid choice"));
        let status = parse_choice::<VacancyStatus>(&self.status)
            .map_err(|_| errors.add("status", "Select a valid choice"));
        let published_at = parse_optional_datetime(&self.published_at)
            .map_err(|_| errors.add("published_at", "Enter a valid date and time"));
        let closed_at = parse_optional_datetime(&self.closed_at)
            .map_err(|_| errors.add("closed_at", "Enter a valid date and time"));

        match (company, salary, employment_type, status, published_at, closed_at) {
            (Ok(company), Ok(salary), Ok(employment_type), Ok(status), Ok(published_at), Ok(closed_at)) => {
                Ok(CreateVacancyPayload {
                    company,
                    title: self.title.trim().to_string(),
                    requirements: self.requirements.clone(),
                    description: self.description.clone(),
                    salary,
                    employment_type,
                    schedule: self.schedule.trim().to_string(),
                    location: self.location.trim().to_string(),
                    status,
                    published_at,
                    closed_at,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_choice<T: std::str::FromStr>(raw: &str) -> std::result::Result<Option<T>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

fn parse_optional_datetime(
    raw: &str,
) -> std::result::Result<Option<chrono::DateTime<chrono::Utc>>, ()> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_datetime(raw).map(Some).ok_or(())
}

fn choices<T: Copy + std::fmt::Display>(all: &[T]) -> Vec<(String, String)> {
    all.iter().map(|c| (c.to_string(), c.to_string())).collect()
}

fn form_view(
    title: &'static str,
    action: String,
    submit: &'static str,
    values: &VacancyForm,
    companies: &[Company],
) -> FormView {
    let company_options = std::iter::once((String::new(), "---------".to_string())).chain(
        companies
            .iter()
            .map(|c| (c.id.to_string(), c.name.clone())),
    );

    FormView::new(title, action, submit)
        .field(FieldView::select("Company", "company", company_options, &values.company))
        .field(FieldView::input("Title", "title", "text", &values.title))
        .field(FieldView::textarea("Requirements", "requirements", &values.requirements))
        .field(FieldView::textarea("Description", "description", &values.description))
        .field(FieldView::input("Salary", "salary", "number", &values.salary))
        .field(FieldView::select(
            "Employment type",
            "employment_type",
            choices(EmploymentType::ALL),
            &values.employment_type,
        ))
        .field(FieldView::input("Schedule", "schedule", "text", &values.schedule))
        .field(FieldView::input("Location", "location", "text", &values.location))
        .field(FieldView::select(
            "Status",
            "status",
            choices(VacancyStatus::ALL),
            &values.status,
        ))
        .field(FieldView::input(
            "Published at",
            "published_at",
            "datetime-local",
            &values.published_at,
        ))
        .field(FieldView::input(
            "Closed at",
            "closed_at",
            "datetime-local",
            &values.closed_at,
        ))
}

#[axum::debug_handler]
pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<VacancyListQuery>,
) -> Result<Html<String>> {
    let listing = state.vacancy_service.list(query).await?;
    render_template(&VacancyListView::from(&listing))
}

#[axum::debug_handler]
pub async fn add_page(State(state): State<AppState>) -> Result<Html<String>> {
    let companies = state.company_service.list_all().await?;
    let view = form_view(
        "Add vacancy",
        "/vacancies/add".into(),
        "Create",
        &VacancyForm::default(),
        &companies,
    );
    render_template(&view)
}

#[axum::debug_handler]
pub async fn add_submit(
    State(state): State<AppState>,
    Form(values): Form<VacancyForm>,
) -> Result<Response> {
    let errors = match values.parse() {
        Ok(payload) => match state.vacancy_service.create(payload).await {
            Ok(_) => return Ok(Redirect::to(LIST_URL).into_response()),
            Err(err) => into_form_errors(err)?,
        },
        Err(errors) => errors,
    };
    let companies = state.company_service.list_all().await?;
    let view = form_view("Add vacancy", "/vacancies/add".into(), "Create", &values, &companies)
        .with_errors(&errors);
    Ok(render_rejected(&view)?.into_response())
}

#[axum::debug_handler]
pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    let companies = state.company_service.list_all().await?;
    let view = form_view(
        "Edit vacancy",
        format!("/vacancies/{}/edit", id),
        "Save",
        &VacancyForm::from_vacancy(&vacancy),
        &companies,
    );
    render_template(&view)
}

#[axum::debug_handler]
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(values): Form<VacancyForm>,
) -> Result<Response> {
    let errors = match values.parse() {
        Ok(payload) => {
            let update = UpdateVacancyPayload::from(payload);
            match state.vacancy_service.update(id, update).await {
                Ok(_) => return Ok(Redirect::to(LIST_URL).into_response()),
                Err(err) => into_form_errors(err)?,
            }
        }
        Err(errors) => errors,
    };
    let companies = state.company_service.list_all().await?;
    let view = form_view(
        "Edit vacancy",
        format!("/vacancies/{}/edit", id),
        "Save",
        &values,
        &companies,
    )
    .with_errors(&errors);
    Ok(render_rejected(&view)?.into_response())
}

#[axum::debug_handler]
pub async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    render_template(&ConfirmDeleteView {
        title: "Delete vacancy",
        what: format!("vacancy \"{}\"", vacancy.title),
        action: format!("/vacancies/{}/delete", id),
        back: LIST_URL,
    })
}

#[axum::debug_handler]
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    state.vacancy_service.delete(id).await?;
    Ok(Redirect::to(LIST_URL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> VacancyForm {
        VacancyForm {
            company: Uuid::new_v4().to_string(),
            title: "Backend intern".into(),
            description: "Rust services".into(),
            salary: "50000".into(),
            employment_type: "internship".into(),
            status: "active".into(),
            published_at: "2026-01-10T09:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_a_complete_submission() {
        let payload = filled().parse().unwrap();
        assert_eq!(payload.salary, 50_000);
        assert_eq!(payload.employment_type, Some(EmploymentType::Internship));
        assert_eq!(payload.status, Some(VacancyStatus::Active));
        assert!(payload.published_at.is_some());
        assert!(payload.closed_at.is_none());
    }

    #[test]
    fn reports_every_unparseable_field() {
        let form = VacancyForm {
            company: "nope".into(),
            salary: "lots".into(),
            status: "paused".into(),
            closed_at: "someday".into(),
            ..filled()
        };
        let errors = form.parse().unwrap_err();
        for field in ["company", "salary", "status", "closed_at"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("published_at"));
    }

    #[test]
    fn rejected_form_keeps_submitted_choices() {
        let form = VacancyForm {
            salary: "0".into(),
            employment_type: "part_time".into(),
            ..filled()
        };
        let mut errors = FieldErrors::new();
        errors.add("salary", "Salary must be a positive number");
        let view = form_view("Add vacancy", "/vacancies/add".into(), "Create", &form, &[])
            .with_errors(&errors);
        let html = render_template(&view).unwrap().0;
        assert!(html.contains("<option value=\"part_time\" selected>"));
        assert!(html.contains("value=\"Backend intern\""));
        assert!(html.contains("<li>Salary must be a positive number</li>"));
    }

    #[test]
    fn blank_choices_fall_back_to_defaults() {
        let form = VacancyForm {
            employment_type: String::new(),
            status: String::new(),
            published_at: String::new(),
            ..filled()
        };
        let payload = form.parse().unwrap();
        assert!(payload.employment_type.is_none());
        assert!(payload.status.is_none());
        assert!(payload.published_at.is_none());
    }
}
