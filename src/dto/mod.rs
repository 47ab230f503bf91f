pub mod application_dto;
pub mod common;
pub mod company_dto;
pub mod resume_dto;
pub mod student_dto;
pub mod vacancy_dto;
