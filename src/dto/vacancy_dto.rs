use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::vacancy::{EmploymentType, Vacancy, VacancyStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVacancyPayload {
    pub company: Uuid,
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters"))]
    pub title: String,
    #[serde(default)]
    pub requirements: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub salary: i64,
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    #[validate(length(max = 100, message = "Schedule must be at most 100 characters"))]
    pub schedule: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Location must be at most 150 characters"))]
    pub location: String,
    pub status: Option<VacancyStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVacancyPayload {
    pub company: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters"))]
    pub title: Option<String>,
    pub requirements: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub salary: Option<i64>,
    pub employment_type: Option<EmploymentType>,
    #[validate(length(max = 100, message = "Schedule must be at most 100 characters"))]
    pub schedule: Option<String>,
    #[validate(length(max = 150, message = "Location must be at most 150 characters"))]
    pub location: Option<String>,
    pub status: Option<VacancyStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl CreateVacancyPayload {
    pub fn into_vacancy(self, now: DateTime<Utc>) -> Vacancy {
        Vacancy {
            id: Uuid::nil(),
            company_id: self.company,
            title: self.title,
            requirements: self.requirements,
            description: self.description,
            salary: self.salary,
            employment_type: self.employment_type.unwrap_or(EmploymentType::FullTime),
            schedule: self.schedule,
            location: self.location,
            status: self.status.unwrap_or(VacancyStatus::Draft),
            published_at: self.published_at.unwrap_or(now),
            closed_at: self.closed_at,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateVacancyPayload {
    /// Merges the supplied fields into `vacancy`; absent fields keep their value.
    pub fn apply(self, vacancy: &mut Vacancy, now: DateTime<Utc>) {
        if let Some(v) = self.company {
            vacancy.company_id = v;
        }
        if let Some(v) = self.title {
            vacancy.title = v;
        }
        if let Some(v) = self.requirements {
            vacancy.requirements = v;
        }
        if let Some(v) = self.description {
            vacancy.description = v;
        }
        if let Some(v) = self.salary {
            vacancy.salary = v;
        }
        if let Some(v) = self.employment_type {
            vacancy.employment_type = v;
        }
        if let Some(v) = self.schedule {
            vacancy.schedule = v;
        }
        if let Some(v) = self.location {
            vacancy.location = v;
        }
        if let Some(v) = self.status {
            vacancy.status = v;
        }
        if let Some(v) = self.published_at {
            vacancy.published_at = v;
        }
        if self.closed_at.is_some() {
            vacancy.closed_at = self.closed_at;
        }
        vacancy.updated_at = now;
    }
}

impl From<CreateVacancyPayload> for UpdateVacancyPayload {
    fn from(value: CreateVacancyPayload) -> Self {
        Self {
            company: Some(value.company),
            title: Some(value.title),
            requirements: Some(value.requirements),
            description: Some(value.description),
            salary: Some(value.salary),
            employment_type: value.employment_type,
            schedule: Some(value.schedule),
            location: Some(value.location),
            status: value.status,
            published_at: value.published_at,
            closed_at: value.closed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub company: Uuid,
    pub title: String,
    pub requirements: String,
    pub description: String,
    pub salary: i64,
    pub employment_type: EmploymentType,
    pub schedule: String,
    pub location: String,
    pub status: VacancyStatus,
    pub published_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            company: value.company_id,
            title: value.title,
            requirements: value.requirements,
            description: value.description,
            salary: value.salary,
            employment_type: value.employment_type,
            schedule: value.schedule,
            location: value.location,
            status: value.status,
            published_at: value.published_at,
            closed_at: value.closed_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationsCountResponse {
    pub applications_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub company: Option<Uuid>,
    pub employment_type: Option<EmploymentType>,
    pub status: Option<VacancyStatus>,
    pub published_at: Option<NaiveDate>,
    pub closed_at: Option<NaiveDate>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn stored() -> Vacancy {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        CreateVacancyPayload {
            company: Uuid::new_v4(),
            title: "Data analyst".into(),
            requirements: String::new(),
            description: "SQL and dashboards".into(),
            salary: 80_000,
            employment_type: None,
            schedule: String::new(),
            location: String::new(),
            status: None,
            published_at: None,
            closed_at: None,
        }
        .into_vacancy(now)
    }

    #[test]
    fn create_applies_model_defaults() {
        let v = stored();
        assert_eq!(v.employment_type, EmploymentType::FullTime);
        assert_eq!(v.status, VacancyStatus::Draft);
        assert_eq!(v.published_at, v.created_at);
        assert!(v.closed_at.is_none());
    }

    #[test]
    fn partial_update_keeps_untouched_fields() {
        let mut v = stored();
        let later = v.created_at + Duration::hours(1);
        UpdateVacancyPayload {
            salary: Some(0),
            ..Default::default()
        }
        .apply(&mut v, later);
        assert_eq!(v.salary, 0);
        assert_eq!(v.title, "Data analyst");
        assert_eq!(v.updated_at, later);
    }

    #[test]
    fn response_names_the_company_relation() {
        let v = stored();
        let company = v.company_id;
        let json = serde_json::to_value(VacancyResponse::from(v)).unwrap();
        assert_eq!(json["company"], serde_json::json!(company));
        assert_eq!(json["employment_type"], "full_time");
    }
}
