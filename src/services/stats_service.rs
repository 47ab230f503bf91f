use std::collections::HashMap;

use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ObjectCounts {
    pub companies: i64,
    pub vacancies: i64,
    pub students: i64,
    pub resumes: i64,
    pub applications: i64,
}

impl ObjectCounts {
    pub fn total(&self) -> i64 {
        self.companies + self.vacancies + self.students + self.resumes + self.applications
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationStats {
    pub total: i64,
    /// One entry per status, in declaration order, zero counts included.
    pub by_status: Vec<(ApplicationStatus, i64)>,
}

impl ApplicationStats {
    fn from_rows(rows: Vec<(String, i64)>) -> Self {
        let counts: HashMap<String, i64> = rows.into_iter().collect();
        let by_status: Vec<(ApplicationStatus, i64)> = ApplicationStatus::ALL
            .iter()
            .map(|status| (*status, counts.get(status.as_str()).copied().unwrap_or(0)))
            .collect();
        let total = counts.values().sum();
        Self { total, by_status }
    }
}

/// Read-only totals used by the admin binary.
#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_objects(&self) -> Result<ObjectCounts> {
        let counts = sqlx::query_as::<_, ObjectCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM companies) AS companies,
                (SELECT COUNT(*) FROM vacancies) AS vacancies,
                (SELECT COUNT(*) FROM students) AS students,
                (SELECT COUNT(*) FROM resumes) AS resumes,
                (SELECT COUNT(*) FROM applications) AS applications
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    pub async fn application_stats(&self) -> Result<ApplicationStats> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM applications GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ApplicationStats::from_rows(rows))
    }
}
