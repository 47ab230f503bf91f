use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::resume::{Resume, ResumeStatus, DEFAULT_RESUME_TITLE};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateResumePayload {
    pub student: Uuid,
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Experience is required"))]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub achievements: String,
    #[validate(length(min = 1, message = "Contacts are required"))]
    pub contacts: String,
    pub status: Option<ResumeStatus>,
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateResumePayload {
    pub student: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Experience is required"))]
    pub experience: Option<String>,
    pub education: Option<String>,
    pub achievements: Option<String>,
    #[validate(length(min = 1, message = "Contacts are required"))]
    pub contacts: Option<String>,
    pub status: Option<ResumeStatus>,
    pub skills: Option<String>,
}

impl CreateResumePayload {
    pub fn into_resume(self, now: DateTime<Utc>) -> Resume {
        Resume {
            id: Uuid::nil(),
            student_id: self.student,
            title: self
                .title
                .unwrap_or_else(|| DEFAULT_RESUME_TITLE.to_string()),
            experience: self.experience,
            education: self.education,
            achievements: self.achievements,
            contacts: self.contacts,
            status: self.status.unwrap_or(ResumeStatus::Draft),
            skills: self.skills,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateResumePayload {
    pub fn apply(self, resume: &mut Resume, now: DateTime<Utc>) {
        if let Some(v) = self.student {
            resume.student_id = v;
        }
        if let Some(v) = self.title {
            resume.title = v;
        }
        if let Some(v) = self.experience {
            resume.experience = v;
        }
        if let Some(v) = self.education {
            resume.education = v;
        }
        if let Some(v) = self.achievements {
            resume.achievements = v;
        }
        if let Some(v) = self.contacts {
            resume.contacts = v;
        }
        if let Some(v) = self.status {
            resume.status = v;
        }
        if let Some(v) = self.skills {
            resume.skills = v;
        }
        resume.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub student: Uuid,
    pub title: String,
    pub experience: String,
    pub education: String,
    pub achievements: String,
    pub contacts: String,
    pub status: ResumeStatus,
    pub skills: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(value: Resume) -> Self {
        Self {
            id: value.id,
            student: value.student_id,
            title: value.title,
            experience: value.experience,
            education: value.education,
            achievements: value.achievements,
            contacts: value.contacts,
            status: value.status,
            skills: value.skills,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResumeListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub student: Option<Uuid>,
    pub status: Option<ResumeStatus>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}
