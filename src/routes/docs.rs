use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    application_dto::{ApplicationResponse, CreateApplicationPayload, UpdateApplicationPayload},
    company_dto::{CompanyResponse, CreateCompanyPayload, UpdateCompanyPayload},
    resume_dto::{CreateResumePayload, ResumeResponse, UpdateResumePayload},
    student_dto::{CreateStudentPayload, StudentResponse, UpdateStudentPayload},
    vacancy_dto::{
        ApplicationsCountResponse, CreateVacancyPayload, UpdateVacancyPayload, VacancyResponse,
    },
};
use crate::models::{
    application::ApplicationStatus,
    resume::ResumeStatus,
    student::ApplicationStatistics,
    vacancy::{EmploymentType, VacancyStatus},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health,
        super::company::create_company,
        super::company::list_companies,
        super::company::get_company,
        super::company::update_company,
        super::company::delete_company,
        super::vacancy::create_vacancy,
        super::vacancy::list_vacancies,
        super::vacancy::get_vacancy,
        super::vacancy::update_vacancy,
        super::vacancy::delete_vacancy,
        super::vacancy::close_vacancy,
        super::vacancy::applications_count,
        super::vacancy::complex_vacancy,
        super::student::create_student,
        super::student::list_students,
        super::student::get_student,
        super::student::update_student,
        super::student::delete_student,
        super::student::applications_statistics,
        super::student::complex_filter,
        super::resume::create_resume,
        super::resume::list_resumes,
        super::resume::get_resume,
        super::resume::update_resume,
        super::resume::delete_resume,
        super::resume::activate_resume,
        super::application::create_application,
        super::application::list_applications,
        super::application::get_application,
        super::application::update_application,
        super::application::delete_application,
        super::application::withdraw_application,
        super::application::my_applications,
    ),
    components(schemas(
        CreateCompanyPayload,
        UpdateCompanyPayload,
        CompanyResponse,
        CreateVacancyPayload,
        UpdateVacancyPayload,
        VacancyResponse,
        ApplicationsCountResponse,
        EmploymentType,
        VacancyStatus,
        CreateStudentPayload,
        UpdateStudentPayload,
        StudentResponse,
        ApplicationStatistics,
        CreateResumePayload,
        UpdateResumePayload,
        ResumeResponse,
        ResumeStatus,
        CreateApplicationPayload,
        UpdateApplicationPayload,
        ApplicationResponse,
        ApplicationStatus,
    )),
    info(title = "Job board API")
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
