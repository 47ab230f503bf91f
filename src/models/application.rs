use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::resume::Resume;
use super::text_choices;
use crate::utils::validation::FieldErrors;

pub const APPLICATION_COLUMNS: &str = "id, student_id, vacancy_id, resume_id, cover_letter, submitted_at, status, response_date, employer_comment";

text_choices! {
    pub enum ApplicationStatus {
        Sent => "sent",
        Viewed => "viewed",
        Invited => "invited",
        Rejected => "rejected",
        Accepted => "accepted",
        Withdrawn => "withdrawn",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub student_id: Uuid,
    pub vacancy_id: Uuid,
    pub resume_id: Uuid,
    pub cover_letter: String,
    pub submitted_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub response_date: Option<DateTime<Utc>>,
    pub employer_comment: String,
}

/// The resume must exist and belong to the applying student.
pub fn check_ownership(student_id: Uuid, resume: Option<&Resume>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match resume {
        None => errors.add("resume", "A resume is required to apply"),
        Some(resume) if resume.student_id != student_id => {
            errors.add("resume", "The selected resume belongs to another student")
        }
        Some(_) => {}
    }
    errors.into_result()
}

/// Rules for submitting (or re-submitting on edit) an application.
///
/// `has_duplicate` reports whether another non-withdrawn application for the
/// same student and vacancy exists, the edited record excluded.
pub fn check_submission(
    student_id: Uuid,
    resume: Option<&Resume>,
    has_duplicate: bool,
) -> Result<(), FieldErrors> {
    check_ownership(student_id, resume)?;

    let mut errors = FieldErrors::new();
    if let Some(resume) = resume {
        if !resume.is_active() {
            errors.add("resume", "An active resume is required to apply");
        }
    }
    if has_duplicate {
        errors.add("vacancy", "This student has already applied to this vacancy");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeStatus;

    fn resume(student_id: Uuid, status: ResumeStatus) -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            student_id,
            title: "Main resume".into(),
            experience: "Two internships".into(),
            education: String::new(),
            achievements: String::new(),
            contacts: "ada@uni.test".into(),
            status,
            skills: "rust, sql".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_resume_is_rejected() {
        let errors = check_submission(Uuid::new_v4(), None, false).unwrap_err();
        assert_eq!(errors.get("resume").unwrap()[0], "A resume is required to apply");
    }

    #[test]
    fn resume_of_another_student_is_rejected() {
        let r = resume(Uuid::new_v4(), ResumeStatus::Active);
        let errors = check_submission(Uuid::new_v4(), Some(&r), false).unwrap_err();
        assert_eq!(
            errors.get("resume").unwrap()[0],
            "The selected resume belongs to another student"
        );
    }

    #[test]
    fn draft_resume_is_rejected() {
        let student = Uuid::new_v4();
        let r = resume(student, ResumeStatus::Draft);
        let errors = check_submission(student, Some(&r), false).unwrap_err();
        assert_eq!(
            errors.get("resume").unwrap()[0],
            "An active resume is required to apply"
        );
    }

    #[test]
    fn duplicate_is_reported_on_the_vacancy_field() {
        let student = Uuid::new_v4();
        let r = resume(student, ResumeStatus::Active);
        assert!(check_submission(student, Some(&r), false).is_ok());
        let errors = check_submission(student, Some(&r), true).unwrap_err();
        assert!(errors.contains("vacancy"));
        assert!(!errors.contains("resume"));
    }

    #[test]
    fn ownership_ignores_resume_status() {
        let student = Uuid::new_v4();
        let r = resume(student, ResumeStatus::Archived);
        assert!(check_ownership(student, Some(&r)).is_ok());
    }
}
