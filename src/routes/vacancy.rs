use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::ListResponse,
        vacancy_dto::{
            ApplicationsCountResponse, CreateVacancyPayload, UpdateVacancyPayload,
            VacancyListQuery, VacancyResponse,
        },
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy created successfully", body = VacancyResponse),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated successfully", body = VacancyResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.update(id, payload).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 204, description = "Vacancy deleted successfully"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("company" = Option<Uuid>, Query, description = "Filter by company"),
        ("employment_type" = Option<String>, Query, description = "Filter by employment type"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("published_at" = Option<String>, Query, description = "Publication date, YYYY-MM-DD"),
        ("closed_at" = Option<String>, Query, description = "Closing date, YYYY-MM-DD"),
        ("search" = Option<String>, Query, description = "Search in title, description, requirements"),
        ("ordering" = Option<String>, Query, description = "salary, published_at, closed_at; prefix - for descending")
    ),
    responses(
        (status = 200, description = "Paginated list of vacancies"),
        (status = 400, description = "Invalid ordering")
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<VacancyListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.vacancy_service.list(query).await?;
    Ok(Json(ListResponse::<VacancyResponse>::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found", body = VacancyResponse),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/close",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy closed", body = VacancyResponse),
        (status = 400, description = "Closed vacancy fails validation"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn close_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.close(id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}/applications_count",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Number of applications", body = ApplicationsCountResponse),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn applications_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications_count = state.vacancy_service.applications_count(id).await?;
    Ok(Json(ApplicationsCountResponse { applications_count }))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/complex_vacancy",
    responses(
        (status = 200, description = "Active vacancies published this year and high-paying IT vacancies", body = [VacancyResponse])
    )
)]
#[axum::debug_handler]
pub async fn complex_vacancy(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.complex().await?;
    let body: Vec<VacancyResponse> = items.into_iter().map(VacancyResponse::from).collect();
    Ok(Json(body))
}
