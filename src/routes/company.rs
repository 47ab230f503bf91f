use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::ListResponse,
        company_dto::{CompanyListQuery, CompanyResponse, CreateCompanyPayload, UpdateCompanyPayload},
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CompanyResponse::from(company))))
}

#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.update(id, payload).await?;
    Ok(Json(CompanyResponse::from(company)))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted with its vacancies"),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.company_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/companies",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("industry" = Option<String>, Query, description = "Filter by industry"),
        ("size" = Option<String>, Query, description = "Filter by size"),
        ("search" = Option<String>, Query, description = "Search in name, description"),
        ("ordering" = Option<String>, Query, description = "name, industry; prefix - for descending")
    ),
    responses(
        (status = 200, description = "Paginated list of companies"),
        (status = 400, description = "Invalid ordering")
    )
)]
#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.company_service.list(query).await?;
    Ok(Json(ListResponse::<CompanyResponse>::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 404, description = "Company not found")
    )
)]
#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let company = state.company_service.get_by_id(id).await?;
    Ok(Json(CompanyResponse::from(company)))
}
