use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::student::Student;

fn default_course() -> i16 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateStudentPayload {
    #[validate(length(min = 1, max = 30, message = "First name must be 1 to 30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "Last name must be 1 to 30 characters"))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: String,
    pub birth_date: NaiveDate,
    #[serde(default = "default_course")]
    pub course: i16,
    #[validate(length(min = 1, max = 150, message = "Specialty must be 1 to 150 characters"))]
    pub specialty: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Group must be at most 50 characters"))]
    pub group: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Faculty must be at most 150 characters"))]
    pub faculty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentPayload {
    #[validate(length(min = 1, max = 30, message = "First name must be 1 to 30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30, message = "Last name must be 1 to 30 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub course: Option<i16>,
    #[validate(length(min = 1, max = 150, message = "Specialty must be 1 to 150 characters"))]
    pub specialty: Option<String>,
    #[validate(length(max = 50, message = "Group must be at most 50 characters"))]
    pub group: Option<String>,
    #[validate(length(max = 150, message = "Faculty must be at most 150 characters"))]
    pub faculty: Option<String>,
}

impl CreateStudentPayload {
    pub fn into_student(self, now: DateTime<Utc>) -> Student {
        Student {
            id: Uuid::nil(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
            course: self.course,
            specialty: self.specialty,
            group: self.group,
            faculty: self.faculty,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateStudentPayload {
    pub fn apply(self, student: &mut Student, now: DateTime<Utc>) {
        if let Some(v) = self.first_name {
            student.first_name = v;
        }
        if let Some(v) = self.last_name {
            student.last_name = v;
        }
        if let Some(v) = self.email {
            student.email = v;
        }
        if let Some(v) = self.phone {
            student.phone = v;
        }
        if let Some(v) = self.birth_date {
            student.birth_date = v;
        }
        if let Some(v) = self.course {
            student.course = v;
        }
        if let Some(v) = self.specialty {
            student.specialty = v;
        }
        if let Some(v) = self.group {
            student.group = v;
        }
        if let Some(v) = self.faculty {
            student.faculty = v;
        }
        student.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub course: i16,
    pub specialty: String,
    pub group: String,
    pub faculty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(value: Student) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            birth_date: value.birth_date,
            course: value.course,
            specialty: value.specialty,
            group: value.group,
            faculty: value.faculty,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub course: Option<i16>,
    pub specialty: Option<String>,
    pub faculty: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}
