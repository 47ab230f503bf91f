use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::ListResponse,
        resume_dto::{CreateResumePayload, ResumeListQuery, ResumeResponse, UpdateResumePayload},
    },
    error::Result,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/resumes",
    request_body = CreateResumePayload,
    responses(
        (status = 201, description = "Resume created", body = ResumeResponse),
        (status = 400, description = "Invalid payload or unknown student")
    )
)]
#[axum::debug_handler]
pub async fn create_resume(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ResumeResponse::from(resume))))
}

#[utoipa::path(
    patch,
    path = "/api/resumes/{id}",
    params(("id" = Uuid, Path, description = "Resume ID")),
    request_body = UpdateResumePayload,
    responses(
        (status = 200, description = "Resume updated", body = ResumeResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.update(id, payload).await?;
    Ok(Json(ResumeResponse::from(resume)))
}

#[utoipa::path(
    delete,
    path = "/api/resumes/{id}",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 204, description = "Resume deleted"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.resume_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/resumes",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("student" = Option<Uuid>, Query, description = "Filter by student"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Search in title, experience, skills"),
        ("ordering" = Option<String>, Query, description = "created_at, updated_at; prefix - for descending")
    ),
    responses(
        (status = 200, description = "Paginated list of resumes"),
        (status = 400, description = "Invalid ordering")
    )
)]
#[axum::debug_handler]
pub async fn list_resumes(
    State(state): State<AppState>,
    Query(query): Query<ResumeListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.resume_service.list(query).await?;
    Ok(Json(ListResponse::<ResumeResponse>::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/resumes/{id}",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume found", body = ResumeResponse),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.get_by_id(id).await?;
    Ok(Json(ResumeResponse::from(resume)))
}

#[utoipa::path(
    post,
    path = "/api/resumes/{id}/resume_activate",
    params(("id" = Uuid, Path, description = "Resume ID")),
    responses(
        (status = 200, description = "Resume activated", body = ResumeResponse),
        (status = 400, description = "Resume fails validation"),
        (status = 404, description = "Resume not found")
    )
)]
#[axum::debug_handler]
pub async fn activate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let resume = state.resume_service.activate(id).await?;
    Ok(Json(ResumeResponse::from(resume)))
}
