use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        application_dto::{
            ApplicationListQuery, ApplicationResponse, CreateApplicationPayload,
            MyApplicationsQuery, UpdateApplicationPayload,
        },
        common::ListResponse,
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Missing, foreign or inactive resume, or duplicate application"),
        (status = 409, description = "Concurrent duplicate application")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.update(id, payload).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("student" = Option<Uuid>, Query, description = "Filter by student"),
        ("vacancy" = Option<Uuid>, Query, description = "Filter by vacancy"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Search in cover letter"),
        ("ordering" = Option<String>, Query, description = "submitted_at, status; prefix - for descending")
    ),
    responses(
        (status = 200, description = "Paginated list of applications"),
        (status = 400, description = "Invalid ordering")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.application_service.list(query).await?;
    Ok(Json(ListResponse::<ApplicationResponse>::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/withdraw",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application withdrawn", body = ApplicationResponse),
        (status = 400, description = "Resume no longer belongs to the student"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn withdraw_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.withdraw(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications/my_applications",
    params(("student" = Uuid, Query, description = "Student ID")),
    responses(
        (status = 200, description = "Applications of the student, newest first", body = [ApplicationResponse]),
        (status = 400, description = "Missing or malformed student"),
        (status = 404, description = "Student not found")
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Query(query): Query<MyApplicationsQuery>,
) -> Result<impl IntoResponse> {
    let items = state.application_service.my_applications(query.student).await?;
    let body: Vec<ApplicationResponse> = items.into_iter().map(ApplicationResponse::from).collect();
    Ok(Json(body))
}
