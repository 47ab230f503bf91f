use sqlx::PgPool;
use uuid::Uuid;

use crate::database::listing::{
    fetch_page, parse_ordering, Bind, Condition, ListRequest, Listing, OrderTerm, Page,
};
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancyListQuery};
use crate::error::{Error, Result};
use crate::models::vacancy::{Vacancy, VacancyStatus, VACANCY_COLUMNS};
use crate::utils::time::{year_bounds, SharedClock};
use crate::utils::validation::validate;

const ORDERING_FIELDS: &[&str] = &["salary", "published_at", "closed_at"];
const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::desc("published_at")];
const SEARCH_FIELDS: &[&str] = &["title", "description", "requirements"];

/// Salary strictly above this, in an IT company, qualifies for the composite filter.
pub const HIGH_SALARY_THRESHOLD: i64 = 100_000;
pub const HIGH_SALARY_INDUSTRY: &str = "IT";

#[derive(Clone)]
pub struct VacancyService {
    pool: PgPool,
    clock: SharedClock,
}

impl VacancyService {
    pub fn new(pool: PgPool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, payload: CreateVacancyPayload) -> Result<Vacancy> {
        validate(&payload)?;
        let now = self.clock.now();
        let vacancy = payload.into_vacancy(now);
        vacancy.check(now)?;

        let created = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            INSERT INTO vacancies (
                company_id, title, requirements, description, salary, employment_type,
                schedule, location, status, published_at, closed_at, created_at, updated_at
            ) VALUES (
                $1,$2,$3,$4,$5,$6,
                $7,$8,$9,$10,$11,$12,$13
            )
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        ))
        .bind(vacancy.company_id)
        .bind(&vacancy.title)
        .bind(&vacancy.requirements)
        .bind(&vacancy.description)
        .bind(vacancy.salary)
        .bind(vacancy.employment_type.as_str())
        .bind(&vacancy.schedule)
        .bind(&vacancy.location)
        .bind(vacancy.status.as_str())
        .bind(vacancy.published_at)
        .bind(vacancy.closed_at)
        .bind(vacancy.created_at)
        .bind(vacancy.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(vacancy_id = %created.id, company_id = %created.company_id, "vacancy created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateVacancyPayload) -> Result<Vacancy> {
        validate(&payload)?;
        let now = self.clock.now();
        let mut vacancy = self.get_by_id(id).await?;
        payload.apply(&mut vacancy, now);
        self.save(vacancy, now).await
    }

    /// Status → closed and closed_at → now; each call advances closed_at.
    pub async fn close(&self, id: Uuid) -> Result<Vacancy> {
        let now = self.clock.now();
        let mut vacancy = self.get_by_id(id).await?;
        vacancy.close(now);
        let closed = self.save(vacancy, now).await?;
        tracing::info!(vacancy_id = %id, closed_at = %now, "vacancy closed");
        Ok(closed)
    }

    /// Validates the full record and writes every mutable column.
    async fn save(&self, vacancy: Vacancy, now: chrono::DateTime<chrono::Utc>) -> Result<Vacancy> {
        vacancy.check(now)?;

        let saved = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            UPDATE vacancies
            SET
                company_id = $2,
                title = $3,
                requirements = $4,
                description = $5,
                salary = $6,
                employment_type = $7,
                schedule = $8,
                location = $9,
                status = $10,
                published_at = $11,
                closed_at = $12,
                updated_at = $13
            WHERE id = $1
            RETURNING {}
            "#,
            VACANCY_COLUMNS
        ))
        .bind(vacancy.id)
        .bind(vacancy.company_id)
        .bind(&vacancy.title)
        .bind(&vacancy.requirements)
        .bind(&vacancy.description)
        .bind(vacancy.salary)
        .bind(vacancy.employment_type.as_str())
        .bind(&vacancy.schedule)
        .bind(&vacancy.location)
        .bind(vacancy.status.as_str())
        .bind(vacancy.published_at)
        .bind(vacancy.closed_at)
        .bind(vacancy.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list(&self, query: VacancyListQuery) -> Result<Listing<Vacancy>> {
        let mut conditions = Vec::new();
        if let Some(company) = query.company {
            conditions.push(Condition::Eq("company_id", Bind::Uuid(company)));
        }
        if let Some(employment_type) = query.employment_type {
            conditions.push(Condition::Eq(
                "employment_type",
                Bind::Text(employment_type.as_str().to_string()),
            ));
        }
        if let Some(status) = query.status {
            conditions.push(Condition::Eq("status", Bind::Text(status.as_str().to_string())));
        }
        if let Some(date) = query.published_at {
            conditions.push(Condition::OnDate("published_at", date));
        }
        if let Some(date) = query.closed_at {
            conditions.push(Condition::OnDate("closed_at", date));
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            conditions.push(Condition::Search(SEARCH_FIELDS, search));
        }

        let request = ListRequest {
            conditions,
            ordering: parse_ordering(query.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
            page: Page::new(query.page, query.per_page),
        };
        fetch_page(&self.pool, "vacancies", VACANCY_COLUMNS, &request).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacancy> {
        sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {} FROM vacancies WHERE id = $1",
            VACANCY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Vacancy not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Vacancy not found".into()));
        }
        tracing::info!(vacancy_id = %id, "vacancy deleted");
        Ok(())
    }

    pub async fn applications_count(&self, id: Uuid) -> Result<i64> {
        self.get_by_id(id).await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE vacancy_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Active vacancies published this calendar year, plus IT-industry
    /// vacancies paying above the threshold. Newest first, no repeats.
    pub async fn complex(&self) -> Result<Vec<Vacancy>> {
        let (year_start, next_year_start) = year_bounds(self.clock.now());
        let items = sqlx::query_as::<_, Vacancy>(&format!(
            r#"
            SELECT {}
            FROM vacancies
            WHERE (published_at >= $1 AND published_at < $2 AND status = $3)
               OR (salary > $4 AND company_id IN (
                    SELECT id FROM companies WHERE LOWER(industry) = LOWER($5)
               ))
            ORDER BY published_at DESC, id ASC
            "#,
            VACANCY_COLUMNS
        ))
        .bind(year_start)
        .bind(next_year_start)
        .bind(VacancyStatus::Active.as_str())
        .bind(HIGH_SALARY_THRESHOLD)
        .bind(HIGH_SALARY_INDUSTRY)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
