use sqlx::PgPool;
use uuid::Uuid;

use crate::database::listing::{
    fetch_page, parse_ordering, Bind, Condition, ListRequest, Listing, OrderTerm, Page,
};
use crate::dto::application_dto::{
    ApplicationListQuery, CreateApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{
    check_ownership, check_submission, Application, ApplicationStatus, APPLICATION_COLUMNS,
};
use crate::models::resume::{Resume, RESUME_COLUMNS};
use crate::utils::time::SharedClock;
use crate::utils::validation::{validate, FieldErrors};

const ORDERING_FIELDS: &[&str] = &["submitted_at", "status"];
const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::desc("submitted_at")];
const SEARCH_FIELDS: &[&str] = &["cover_letter"];

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    clock: SharedClock,
}

impl ApplicationService {
    pub fn new(pool: PgPool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, payload: CreateApplicationPayload) -> Result<Application> {
        validate(&payload)?;
        let resume_id = payload.resume.ok_or_else(resume_required)?;
        let resume = self.load_resume(resume_id).await?;
        let has_duplicate = self
            .has_active_duplicate(payload.student, payload.vacancy, None)
            .await?;
        check_submission(payload.student, Some(&resume), has_duplicate)?;

        let application = payload.into_application(resume_id, self.clock.now());
        let created = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (
                student_id, vacancy_id, resume_id, cover_letter, submitted_at,
                status, response_date, employer_comment
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.student_id)
        .bind(application.vacancy_id)
        .bind(application.resume_id)
        .bind(&application.cover_letter)
        .bind(application.submitted_at)
        .bind(application.status.as_str())
        .bind(application.response_date)
        .bind(&application.employer_comment)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            application_id = %created.id,
            student_id = %created.student_id,
            vacancy_id = %created.vacancy_id,
            "application submitted"
        );
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateApplicationPayload) -> Result<Application> {
        validate(&payload)?;
        let mut application = self.get_by_id(id).await?;
        payload.apply(&mut application);

        let resume = self.load_resume(application.resume_id).await?;
        let has_duplicate = application.status != ApplicationStatus::Withdrawn
            && self
                .has_active_duplicate(application.student_id, application.vacancy_id, Some(id))
                .await?;
        check_submission(application.student_id, Some(&resume), has_duplicate)?;

        self.save(application).await
    }

    pub async fn withdraw(&self, id: Uuid) -> Result<Application> {
        let mut application = self.get_by_id(id).await?;
        let resume = self.find_resume(application.resume_id).await?;
        check_ownership(application.student_id, resume.as_ref())?;

        application.status = ApplicationStatus::Withdrawn;
        let saved = self.save(application).await?;
        tracing::info!(application_id = %id, "application withdrawn");
        Ok(saved)
    }

    async fn save(&self, application: Application) -> Result<Application> {
        let saved = sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications
            SET
                student_id = $2,
                vacancy_id = $3,
                resume_id = $4,
                cover_letter = $5,
                status = $6,
                response_date = $7,
                employer_comment = $8
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.id)
        .bind(application.student_id)
        .bind(application.vacancy_id)
        .bind(application.resume_id)
        .bind(&application.cover_letter)
        .bind(application.status.as_str())
        .bind(application.response_date)
        .bind(&application.employer_comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".into()));
        }
        tracing::info!(application_id = %id, "application deleted");
        Ok(())
    }

    pub async fn list(&self, query: ApplicationListQuery) -> Result<Listing<Application>> {
        let mut conditions = Vec::new();
        if let Some(student) = query.student {
            conditions.push(Condition::Eq("student_id", Bind::Uuid(student)));
        }
        if let Some(vacancy) = query.vacancy {
            conditions.push(Condition::Eq("vacancy_id", Bind::Uuid(vacancy)));
        }
        if let Some(status) = query.status {
            conditions.push(Condition::Eq("status", Bind::Text(status.as_str().to_string())));
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            conditions.push(Condition::Search(SEARCH_FIELDS, search));
        }

        let request = ListRequest {
            conditions,
            ordering: parse_ordering(query.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
            page: Page::new(query.page, query.per_page),
        };
        fetch_page(&self.pool, "applications", APPLICATION_COLUMNS, &request).await
    }

    /// All applications of one student, newest first.
    pub async fn my_applications(&self, student: Option<Uuid>) -> Result<Vec<Application>> {
        let student_id = student.ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("student", "The student parameter is required");
            Error::Validation(errors)
        })?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Err(Error::NotFound("Student not found".into()));
        }

        let items = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {}
            FROM applications
            WHERE student_id = $1
            ORDER BY submitted_at DESC, id ASC
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_resume(&self, id: Uuid) -> Result<Option<Resume>> {
        let resume = sqlx::query_as::<_, Resume>(&format!(
            "SELECT {} FROM resumes WHERE id = $1",
            RESUME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(resume)
    }

    async fn load_resume(&self, id: Uuid) -> Result<Resume> {
        self.find_resume(id)
            .await?
            .ok_or_else(|| Error::BadRequest("Resume not found".into()))
    }

    async fn has_active_duplicate(
        &self,
        student_id: Uuid,
        vacancy_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM applications
                WHERE student_id = $1
                  AND vacancy_id = $2
                  AND status <> $3
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(student_id)
        .bind(vacancy_id)
        .bind(ApplicationStatus::Withdrawn.as_str())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

fn resume_required() -> Error {
    let mut errors = FieldErrors::new();
    errors.add("resume", "A resume is required to apply");
    Error::Validation(errors)
}
