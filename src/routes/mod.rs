pub mod application;
pub mod company;
pub mod docs;
pub mod extract;
pub mod forms;
pub mod health;
pub mod resume;
pub mod student;
pub mod vacancy;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{cors::api_cors, rate_limit};
use crate::AppState;

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// JSON API under `/api`, guarded by the per-second request budget.
pub fn api_router(rps: u32) -> Router<AppState> {
    Router::new()
        .route(
            "/api/companies",
            get(company::list_companies).post(company::create_company),
        )
        .route(
            "/api/companies/:id",
            get(company::get_company)
                .put(company::update_company)
                .patch(company::update_company)
                .delete(company::delete_company),
        )
        .route(
            "/api/vacancies",
            get(vacancy::list_vacancies).post(vacancy::create_vacancy),
        )
        .route("/api/vacancies/complex_vacancy", get(vacancy::complex_vacancy))
        .route(
            "/api/vacancies/:id",
            get(vacancy::get_vacancy)
                .put(vacancy::update_vacancy)
                .patch(vacancy::update_vacancy)
                .delete(vacancy::delete_vacancy),
        )
        .route("/api/vacancies/:id/close", post(vacancy::close_vacancy))
        .route(
            "/api/vacancies/:id/applications_count",
            get(vacancy::applications_count),
        )
        .route(
            "/api/students",
            get(student::list_students).post(student::create_student),
        )
        .route("/api/students/complex_filter", get(student::complex_filter))
        .route(
            "/api/students/:id",
            get(student::get_student)
                .put(student::update_student)
                .patch(student::update_student)
                .delete(student::delete_student),
        )
        .route(
            "/api/students/:id/applications_statistics",
            get(student::applications_statistics),
        )
        .route(
            "/api/resumes",
            get(resume::list_resumes).post(resume::create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resume::get_resume)
                .put(resume::update_resume)
                .patch(resume::update_resume)
                .delete(resume::delete_resume),
        )
        .route(
            "/api/resumes/:id/resume_activate",
            post(resume::activate_resume),
        )
        .route(
            "/api/applications",
            get(application::list_applications).post(application::create_application),
        )
        .route(
            "/api/applications/my_applications",
            get(application::my_applications),
        )
        .route(
            "/api/applications/:id",
            get(application::get_application)
                .put(application::update_application)
                .patch(application::update_application)
                .delete(application::delete_application),
        )
        .route(
            "/api/applications/:id/withdraw",
            post(application::withdraw_application),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(rps),
            rate_limit::rps_middleware,
        ))
        .layer(api_cors())
}

pub fn form_router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::index))
        .route("/vacancies", get(forms::vacancy::list_page))
        .route(
            "/vacancies/add",
            get(forms::vacancy::add_page).post(forms::vacancy::add_submit),
        )
        .route(
            "/vacancies/:id/edit",
            get(forms::vacancy::edit_page).post(forms::vacancy::edit_submit),
        )
        .route(
            "/vacancies/:id/delete",
            get(forms::vacancy::delete_page).post(forms::vacancy::delete_submit),
        )
        .route("/companies", get(forms::company::list_page))
        .route(
            "/companies/add",
            get(forms::company::add_page).post(forms::company::add_submit),
        )
        .route(
            "/companies/:id/edit",
            get(forms::company::edit_page).post(forms::company::edit_submit),
        )
        .route(
            "/companies/:id/delete",
            get(forms::company::delete_page).post(forms::company::delete_submit),
        )
}

/// The complete application: API, forms, health and the OpenAPI document.
pub fn router(state: AppState, rps: u32) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(docs::openapi_json))
        .merge(api_router(rps))
        .merge(form_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
