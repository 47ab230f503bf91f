use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::validation::FieldErrors;

pub const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, phone, birth_date, course, specialty, study_group, faculty, created_at, updated_at";

pub const MIN_COURSE: i16 = 1;
pub const MAX_COURSE: i16 = 6;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub course: i16,
    pub specialty: String,
    #[sqlx(rename = "study_group")]
    pub group: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn check(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !(MIN_COURSE..=MAX_COURSE).contains(&self.course) {
            errors.add(
                "course",
                format!("Course must be between {} and {}", MIN_COURSE, MAX_COURSE),
            );
        }
        if self.birth_date > today {
            errors.add("birth_date", "Birth date cannot be in the future");
        }
        errors.into_result()
    }
}

/// Per-status counts of one student's applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct ApplicationStatistics {
    pub total_sent: i64,
    pub invited: i64,
    pub rejected: i64,
    pub accepted: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn student(course: i16) -> Student {
        Student {
            id: Uuid::nil(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@uni.test".into(),
            phone: String::new(),
            birth_date: NaiveDate::from_ymd_opt(2004, 5, 1).unwrap(),
            course,
            specialty: "Software engineering".into(),
            group: "SE-31".into(),
            faculty: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn course_must_stay_within_one_to_six() {
        assert!(student(1).check(today()).is_ok());
        assert!(student(6).check(today()).is_ok());
        assert!(student(0).check(today()).unwrap_err().contains("course"));
        assert!(student(7).check(today()).unwrap_err().contains("course"));
    }

    #[test]
    fn birth_date_cannot_be_after_today() {
        let mut s = student(2);
        s.birth_date = today();
        assert!(s.check(today()).is_ok());
        s.birth_date = today().succ_opt().unwrap();
        assert!(s.check(today()).unwrap_err().contains("birth_date"));
    }
}
