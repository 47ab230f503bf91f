use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationPayload {
    pub student: Uuid,
    pub vacancy: Uuid,
    pub resume: Option<Uuid>,
    #[serde(default)]
    pub cover_letter: String,
    pub status: Option<ApplicationStatus>,
    pub response_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub employer_comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationPayload {
    pub student: Option<Uuid>,
    pub vacancy: Option<Uuid>,
    pub resume: Option<Uuid>,
    pub cover_letter: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub response_date: Option<DateTime<Utc>>,
    pub employer_comment: Option<String>,
}

impl CreateApplicationPayload {
    /// Builds the candidate row; `submitted_at` is always server time.
    pub fn into_application(self, resume_id: Uuid, now: DateTime<Utc>) -> Application {
        Application {
            id: Uuid::nil(),
            student_id: self.student,
            vacancy_id: self.vacancy,
            resume_id,
            cover_letter: self.cover_letter,
            submitted_at: now,
            status: self.status.unwrap_or(ApplicationStatus::Sent),
            response_date: self.response_date,
            employer_comment: self.employer_comment,
        }
    }
}

impl UpdateApplicationPayload {
    pub fn apply(self, application: &mut Application) {
        if let Some(v) = self.student {
            application.student_id = v;
        }
        if let Some(v) = self.vacancy {
            application.vacancy_id = v;
        }
        if let Some(v) = self.resume {
            application.resume_id = v;
        }
        if let Some(v) = self.cover_letter {
            application.cover_letter = v;
        }
        if let Some(v) = self.status {
            application.status = v;
        }
        if self.response_date.is_some() {
            application.response_date = self.response_date;
        }
        if let Some(v) = self.employer_comment {
            application.employer_comment = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub student: Uuid,
    pub vacancy: Uuid,
    pub resume: Uuid,
    pub cover_letter: String,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub response_date: Option<DateTime<Utc>>,
    pub employer_comment: String,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            student: value.student_id,
            vacancy: value.vacancy_id,
            resume: value.resume_id,
            cover_letter: value.cover_letter,
            submitted_at: value.submitted_at,
            status: value.status,
            response_date: value.response_date,
            employer_comment: value.employer_comment,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub student: Option<Uuid>,
    pub vacancy: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MyApplicationsQuery {
    pub student: Option<Uuid>,
}
