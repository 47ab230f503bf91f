use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use uuid::Uuid;

use super::into_form_errors;
use crate::{
    dto::company_dto::{CompanyListQuery, CreateCompanyPayload, UpdateCompanyPayload},
    error::Result,
    models::company::Company,
    views::{
        lists::CompanyListView, render_rejected, render_template, ConfirmDeleteView, FieldView,
        FormView,
    },
    AppState,
};

const LIST_URL: &str = "/companies";

// Every company field is text, so the payload doubles as the form.
fn values_of(company: &Company) -> CreateCompanyPayload {
    CreateCompanyPayload {
        name: company.name.clone(),
        description: company.description.clone(),
        website: company.website.clone(),
        email: company.email.clone(),
        phone: company.phone.clone(),
        industry: company.industry.clone(),
        address: company.address.clone(),
        size: company.size.clone(),
    }
}

fn form_view(
    title: &'static str,
    action: String,
    submit: &'static str,
    values: &CreateCompanyPayload,
) -> FormView {
    FormView::new(title, action, submit)
        .field(FieldView::input("Name", "name", "text", &values.name))
        .field(FieldView::textarea("Description", "description", &values.description))
        .field(FieldView::input("Website", "website", "url", &values.website))
        .field(FieldView::input("Email", "email", "email", &values.email))
        .field(FieldView::input("Phone", "phone", "text", &values.phone))
        .field(FieldView::input("Industry", "industry", "text", &values.industry))
        .field(FieldView::input("Address", "address", "text", &values.address))
        .field(FieldView::input("Size", "size", "text", &values.size))
}

#[axum::debug_handler]
pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<Html<String>> {
    let listing = state.company_service.list(query).await?;
    render_template(&CompanyListView::from(&listing))
}

#[axum::debug_handler]
pub async fn add_page() -> Result<Html<String>> {
    render_template(&form_view(
        "Add company",
        "/companies/add".into(),
        "Create",
        &CreateCompanyPayload::default(),
    ))
}

#[axum::debug_handler]
pub async fn add_submit(
    State(state): State<AppState>,
    Form(values): Form<CreateCompanyPayload>,
) -> Result<Response> {
    match state.company_service.create(values.clone()).await {
        Ok(_) => Ok(Redirect::to(LIST_URL).into_response()),
        Err(err) => {
            let errors = into_form_errors(err)?;
            let view = form_view("Add company", "/companies/add".into(), "Create", &values)
                .with_errors(&errors);
            Ok(render_rejected(&view)?.into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let company = state.company_service.get_by_id(id).await?;
    render_template(&form_view(
        "Edit company",
        format!("/companies/{}/edit", id),
        "Save",
        &values_of(&company),
    ))
}

#[axum::debug_handler]
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(values): Form<CreateCompanyPayload>,
) -> Result<Response> {
    let update = UpdateCompanyPayload::from(values.clone());
    match state.company_service.update(id, update).await {
        Ok(_) => Ok(Redirect::to(LIST_URL).into_response()),
        Err(err) => {
            let errors = into_form_errors(err)?;
            let view = form_view("Edit company", format!("/companies/{}/edit", id), "Save", &values)
                .with_errors(&errors);
            Ok(render_rejected(&view)?.into_response())
        }
    }
}

#[axum::debug_handler]
pub async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let company = state.company_service.get_by_id(id).await?;
    render_template(&ConfirmDeleteView {
        title: "Delete company",
        what: format!("company \"{}\" and all of its vacancies", company.name),
        action: format!("/companies/{}/delete", id),
        back: LIST_URL,
    })
}

#[axum::debug_handler]
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    state.company_service.delete(id).await?;
    Ok(Redirect::to(LIST_URL))
}
