use sqlx::PgPool;
use uuid::Uuid;

use crate::database::listing::{
    fetch_page, parse_ordering, Bind, Condition, ListRequest, Listing, OrderTerm, Page,
};
use crate::dto::resume_dto::{CreateResumePayload, ResumeListQuery, UpdateResumePayload};
use crate::error::{Error, Result};
use crate::models::resume::{Resume, RESUME_COLUMNS};
use crate::utils::time::SharedClock;
use crate::utils::validation::validate;

const ORDERING_FIELDS: &[&str] = &["created_at", "updated_at"];
const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::desc("updated_at")];
const SEARCH_FIELDS: &[&str] = &["title", "experience", "skills"];

#[derive(Clone)]
pub struct ResumeService {
    pool: PgPool,
    clock: SharedClock,
}

impl ResumeService {
    pub fn new(pool: PgPool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, payload: CreateResumePayload) -> Result<Resume> {
        validate(&payload)?;
        let resume = payload.into_resume(self.clock.now());
        resume.check()?;

        let created = sqlx::query_as::<_, Resume>(&format!(
            r#"
            INSERT INTO resumes (
                student_id, title, experience, education, achievements, contacts,
                status, skills, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            RETURNING {}
            "#,
            RESUME_COLUMNS
        ))
        .bind(resume.student_id)
        .bind(&resume.title)
        .bind(&resume.experience)
        .bind(&resume.education)
        .bind(&resume.achievements)
        .bind(&resume.contacts)
        .bind(resume.status.as_str())
        .bind(&resume.skills)
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(resume_id = %created.id, student_id = %created.student_id, "resume created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateResumePayload) -> Result<Resume> {
        validate(&payload)?;
        let mut resume = self.get_by_id(id).await?;
        payload.apply(&mut resume, self.clock.now());
        self.save(resume).await
    }

    /// Marks the resume active. Already-active resumes are saved again unchanged.
    pub async fn activate(&self, id: Uuid) -> Result<Resume> {
        let mut resume = self.get_by_id(id).await?;
        resume.activate(self.clock.now());
        let saved = self.save(resume).await?;
        tracing::info!(resume_id = %id, "resume activated");
        Ok(saved)
    }

    async fn save(&self, resume: Resume) -> Result<Resume> {
        resume.check()?;

        let saved = sqlx::query_as::<_, Resume>(&format!(
            r#"
            UPDATE resumes
            SET
                student_id = $2,
                title = $3,
                experience = $4,
                education = $5,
                achievements = $6,
                contacts = $7,
                status = $8,
                skills = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            RESUME_COLUMNS
        ))
        .bind(resume.id)
        .bind(resume.student_id)
        .bind(&resume.title)
        .bind(&resume.experience)
        .bind(&resume.education)
        .bind(&resume.achievements)
        .bind(&resume.contacts)
        .bind(resume.status.as_str())
        .bind(&resume.skills)
        .bind(resume.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Resume> {
        sqlx::query_as::<_, Resume>(&format!(
            "SELECT {} FROM resumes WHERE id = $1",
            RESUME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Resume not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Resume not found".into()));
        }
        tracing::info!(resume_id = %id, "resume deleted");
        Ok(())
    }

    pub async fn list(&self, query: ResumeListQuery) -> Result<Listing<Resume>> {
        let mut conditions = Vec::new();
        if let Some(student) = query.student {
            conditions.push(Condition::Eq("student_id", Bind::Uuid(student)));
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
        fetch_page(&self.pool, "resumes", RESUME_COLUMNS, &request).await
    }
}
