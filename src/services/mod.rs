pub mod application_service;
pub mod company_service;
pub mod resume_service;
pub mod stats_service;
pub mod student_service;
pub mod vacancy_service;
