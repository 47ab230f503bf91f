use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::ListResponse,
        student_dto::{CreateStudentPayload, StudentListQuery, StudentResponse, UpdateStudentPayload},
    },
    error::Result,
    models::student::ApplicationStatistics,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentPayload,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateStudentPayload>,
) -> Result<impl IntoResponse> {
    let student = state.student_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentPayload,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateStudentPayload>,
) -> Result<impl IntoResponse> {
    let student = state.student_service.update(id, payload).await?;
    Ok(Json(StudentResponse::from(student)))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted with resumes and applications"),
        (status = 404, description = "Student not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.student_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("course" = Option<i16>, Query, description = "Filter by course"),
        ("specialty" = Option<String>, Query, description = "Filter by specialty"),
        ("faculty" = Option<String>, Query, description = "Filter by faculty"),
        ("search" = Option<String>, Query, description = "Search in first_name, last_name, email"),
        ("ordering" = Option<String>, Query, description = "last_name, first_name, course; prefix - for descending")
    ),
    responses(
        (status = 200, description = "Paginated list of students"),
        (status = 400, description = "Invalid ordering")
    )
)]
#[axum::debug_handler]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.student_service.list(query).await?;
    Ok(Json(ListResponse::<StudentResponse>::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    )
)]
#[axum::debug_handler]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let student = state.student_service.get_by_id(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/applications_statistics",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Application counts by outcome", body = ApplicationStatistics),
        (status = 404, description = "Student not found")
    )
)]
#[axum::debug_handler]
pub async fn applications_statistics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let stats = state.student_service.applications_statistics(id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/students/complex_filter",
    responses(
        (status = 200, description = "Senior students with an active resume, or recent applicants; first-year excluded", body = [StudentResponse])
    )
)]
#[axum::debug_handler]
pub async fn complex_filter(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.student_service.complex_filter().await?;
    let body: Vec<StudentResponse> = items.into_iter().map(StudentResponse::from).collect();
    Ok(Json(body))
}
