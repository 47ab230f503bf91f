use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

use crate::utils::validation::FieldErrors;

pub const COMPANY_COLUMNS: &str = "id, name, description, website, email, phone, industry, address, size, created_at, updated_at";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
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

impl Company {
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Company name is required");
        }
        if self.industry.trim().is_empty() {
            errors.add("industry", "Industry is required");
        }
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !self.email.validate_email() {
            errors.add("email", "Enter a valid email address");
        }
        if !self.website.is_empty() && !self.website.validate_url() {
            errors.add("website", "Enter a valid URL");
        }
        errors.into_result()
    }
}
