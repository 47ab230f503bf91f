use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text_choices;
use crate::utils::validation::FieldErrors;

pub const VACANCY_COLUMNS: &str = "id, company_id, title, requirements, description, salary, employment_type, schedule, location, status, published_at, closed_at, created_at, updated_at";

text_choices! {
    pub enum VacancyStatus {
        Draft => "draft",
        Active => "active",
        Closed => "closed",
        Archived => "archived",
    }
}

text_choices! {
    pub enum EmploymentType {
        FullTime => "full_time",
        PartTime => "part_time",
        Internship => "internship",
        Contract => "contract",
        Remote => "remote",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub requirements: String,
    pub description: String,
    pub salary: i64,
    #[sqlx(try_from = "String")]
    pub employment_type: EmploymentType,
    pub schedule: String,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub status: VacancyStatus,
    pub published_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    /// Entity invariants, evaluated against `now`.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.salary <= 0 {
            errors.add("salary", "Salary must be a positive number");
        }
        if let Some(closed_at) = self.closed_at {
            if closed_at < self.published_at {
                errors.add("closed_at", "Closing date cannot be earlier than the publication date");
            }
        }
        if self.published_at > now {
            errors.add("published_at", "Publication date cannot be in the future");
        }
        errors.into_result()
    }

    /// Closes the vacancy as of `now`.
    pub fn close(&mut self, now: DateTime<Utc>) {
        self.status = VacancyStatus::Closed;
        self.closed_at = Some(now);
        self.updated_at = now;
    }
}
