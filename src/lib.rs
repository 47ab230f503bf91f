pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use crate::services::{
    application_service::ApplicationService, company_service::CompanyService,
    resume_service::ResumeService, student_service::StudentService,
    vacancy_service::VacancyService,
};
use crate::utils::time::{system_clock, SharedClock};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub company_service: CompanyService,
    pub vacancy_service: VacancyService,
    pub student_service: StudentService,
    pub resume_service: ResumeService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, system_clock())
    }

    pub fn with_clock(pool: PgPool, clock: SharedClock) -> Self {
        let company_service = CompanyService::new(pool.clone(), clock.clone());
        let vacancy_service = VacancyService::new(pool.clone(), clock.clone());
        let student_service = StudentService::new(pool.clone(), clock.clone());
        let resume_service = ResumeService::new(pool.clone(), clock.clone());
        let application_service = ApplicationService::new(pool.clone(), clock);

        Self {
            pool,
            company_service,
            vacancy_service,
            student_service,
            resume_service,
            application_service,
        }
    }
}
