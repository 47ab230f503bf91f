use sqlx::PgPool;
use uuid::Uuid;

use crate::database::listing::{
    fetch_page, parse_ordering, Bind, Condition, ListRequest, Listing, OrderTerm, Page,
};
use crate::dto::student_dto::{CreateStudentPayload, StudentListQuery, UpdateStudentPayload};
use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;
use crate::models::resume::ResumeStatus;
use crate::models::student::{ApplicationStatistics, Student, STUDENT_COLUMNS};
use crate::utils::time::{month_start, SharedClock};
use crate::utils::validation::validate;

const ORDERING_FIELDS: &[&str] = &["last_name", "first_name", "course"];
const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::asc("last_name"), OrderTerm::asc("first_name")];
const SEARCH_FIELDS: &[&str] = &["first_name", "last_name", "email"];

/// Courses whose students qualify for the composite filter through an active resume.
pub const SENIOR_COURSES: [i16; 2] = [3, 4];
/// Course excluded from the composite filter altogether.
pub const EXCLUDED_COURSE: i16 = 1;

#[derive(Clone)]
pub struct StudentService {
    pool: PgPool,
    clock: SharedClock,
}

impl StudentService {
    pub fn new(pool: PgPool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, payload: CreateStudentPayload) -> Result<Student> {
        validate(&payload)?;
        let student = payload.into_student(self.clock.now());
        student.check(self.clock.today())?;

        let created = sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (
                first_name, last_name, email, phone, birth_date, course, specialty,
                study_group, faculty, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.birth_date)
        .bind(student.course)
        .bind(&student.specialty)
        .bind(&student.group)
        .bind(&student.faculty)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(student_id = %created.id, "student created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateStudentPayload) -> Result<Student> {
        validate(&payload)?;
        let mut student = self.get_by_id(id).await?;
        payload.apply(&mut student, self.clock.now());
        student.check(self.clock.today())?;

        let updated = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone = $5,
                birth_date = $6,
                course = $7,
                specialty = $8,
                study_group = $9,
                faculty = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.birth_date)
        .bind(student.course)
        .bind(&student.specialty)
        .bind(&student.group)
        .bind(&student.faculty)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Student> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Student not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Student not found".into()));
        }
        tracing::info!(student_id = %id, "student deleted");
        Ok(())
    }

    pub async fn list(&self, query: StudentListQuery) -> Result<Listing<Student>> {
        let mut conditions = Vec::new();
        if let Some(course) = query.course {
            conditions.push(Condition::Eq("course", Bind::SmallInt(course)));
        }
        if let Some(specialty) = query.specialty {
            conditions.push(Condition::Eq("specialty", Bind::Text(specialty)));
        }
        if let Some(faculty) = query.faculty {
            conditions.push(Condition::Eq("faculty", Bind::Text(faculty)));
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            conditions.push(Condition::Search(SEARCH_FIELDS, search));
        }

        let request = ListRequest {
            conditions,
            ordering: parse_ordering(query.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
            page: Page::new(query.page, query.per_page),
        };
        fetch_page(&self.pool, "students", STUDENT_COLUMNS, &request).await
    }

    pub async fn applications_statistics(&self, id: Uuid) -> Result<ApplicationStatistics> {
        self.get_by_id(id).await?;
        let stats = sqlx::query_as::<_, ApplicationStatistics>(
            r#"
            SELECT
                COUNT(*) AS total_sent,
                COUNT(*) FILTER (WHERE status = $2) AS invited,
                COUNT(*) FILTER (WHERE status = $3) AS rejected,
                COUNT(*) FILTER (WHERE status = $4) AS accepted
            FROM applications
            WHERE student_id = $1
            "#,
        )
        .bind(id)
        .bind(ApplicationStatus::Invited.as_str())
        .bind(ApplicationStatus::Rejected.as_str())
        .bind(ApplicationStatus::Accepted.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Students past first year who either are in a senior course with an
    /// active resume, or have applied somewhere since the month began.
    pub async fn complex_filter(&self) -> Result<Vec<Student>> {
        let since = month_start(self.clock.now());
        let items = sqlx::query_as::<_, Student>(&format!(
            r#"
            SELECT {}
            FROM students
            WHERE course <> $1
              AND (
                (course = ANY($2) AND EXISTS (
                    SELECT 1 FROM resumes r
                    WHERE r.student_id = students.id AND r.status = $3
                ))
                OR EXISTS (
                    SELECT 1 FROM applications a
                    WHERE a.student_id = students.id AND a.submitted_at >= $4
                )
              )
            ORDER BY last_name ASC, first_name ASC, id ASC
            "#,
            STUDENT_COLUMNS
        ))
        .bind(EXCLUDED_COURSE)
        .bind(SENIOR_COURSES.to_vec())
        .bind(ResumeStatus::Active.as_str())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
