use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text_choices;
use crate::utils::validation::FieldErrors;

pub const RESUME_COLUMNS: &str = "id, student_id, title, experience, education, achievements, contacts, status, skills, created_at, updated_at";

pub const DEFAULT_RESUME_TITLE: &str = "Main resume";

text_choices! {
    pub enum ResumeStatus {
        Draft => "draft",
        Active => "active",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub experience: String,
    pub education: String,
    pub achievements: String,
    pub contacts: String,
    #[sqlx(try_from = "String")]
    pub status: ResumeStatus,
    pub skills: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "Resume title is required");
        }
        if self.experience.trim().is_empty() {
            errors.add("experience", "Experience is required");
        }
        if self.contacts.trim().is_empty() {
            errors.add("contacts", "Contacts are required");
        }
        errors.into_result()
    }

    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.status = ResumeStatus::Active;
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == ResumeStatus::Active
    }
}
