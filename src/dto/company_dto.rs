use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::company::Company;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Website must be at most 200 characters"))]
    pub website: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "Industry must be 1 to 100 characters"))]
    pub industry: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Size must be at most 50 characters"))]
    pub size: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 200, message = "Website must be at most 200 characters"))]
    pub website: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Industry must be 1 to 100 characters"))]
    pub industry: Option<String>,
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 50, message = "Size must be at most 50 characters"))]
    pub size: Option<String>,
}

impl CreateCompanyPayload {
    pub fn into_company(self, now: DateTime<Utc>) -> Company {
        Company {
            id: Uuid::nil(),
            name: self.name,
            description: self.description,
            website: self.website,
            email: self.email,
            phone: self.phone,
            industry: self.industry,
            address: self.address,
            size: self.size,
            created_at: now,
            updated_at: now,
        }
    }
}

impl UpdateCompanyPayload {
    pub fn apply(self, company: &mut Company, now: DateTime<Utc>) {
        if let Some(v) = self.name {
            company.name = v;
        }
        if let Some(v) = self.description {
            company.description = v;
        }
        if let Some(v) = self.website {
            company.website = v;
        }
        if let Some(v) = self.email {
            company.email = v;
        }
        if let Some(v) = self.phone {
            company.phone = v;
        }
        if let Some(v) = self.industry {
            company.industry = v;
        }
        if let Some(v) = self.address {
            company.address = v;
        }
        if let Some(v) = self.size {
            company.size = v;
        }
        company.updated_at = now;
    }
}

impl From<CreateCompanyPayload> for UpdateCompanyPayload {
    fn from(value: CreateCompanyPayload) -> Self {
        Self {
            name: Some(value.name),
            description: Some(value.description),
            website: Some(value.website),
            email: Some(value.email),
            phone: Some(value.phone),
            industry: Some(value.industry),
            address: Some(value.address),
            size: Some(value.size),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub address: String,
    pub size: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(value: Company) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            website: value.website,
            email: value.email,
            phone: value.phone,
            industry: value.industry,
            address: value.address,
            size: value.size,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}
