use sqlx::PgPool;
use uuid::Uuid;

use crate::database::listing::{
    fetch_page, parse_ordering, Bind, Condition, ListRequest, Listing, OrderTerm, Page,
};
use crate::dto::company_dto::{CompanyListQuery, CreateCompanyPayload, UpdateCompanyPayload};
use crate::error::{Error, Result};
use crate::models::company::{Company, COMPANY_COLUMNS};
use crate::utils::time::SharedClock;
use crate::utils::validation::validate;

const ORDERING_FIELDS: &[&str] = &["name", "industry"];
const DEFAULT_ORDERING: &[OrderTerm] = &[OrderTerm::asc("name")];
const SEARCH_FIELDS: &[&str] = &["name", "description"];

#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    clock: SharedClock,
}

impl CompanyService {
    pub fn new(pool: PgPool, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create(&self, payload: CreateCompanyPayload) -> Result<Company> {
        validate(&payload)?;
        let company = payload.into_company(self.clock.now());
        company.check()?;

        let created = sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (
                name, description, website, email, phone, industry, address, size,
                created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.industry)
        .bind(&company.address)
        .bind(&company.size)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(company_id = %created.id, "company created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCompanyPayload) -> Result<Company> {
        validate(&payload)?;
        let mut company = self.get_by_id(id).await?;
        payload.apply(&mut company, self.clock.now());
        company.check()?;

        let updated = sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies
            SET
                name = $2,
                description = $3,
                website = $4,
                email = $5,
                phone = $6,
                industry = $7,
                address = $8,
                size = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.website)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.industry)
        .bind(&company.address)
        .bind(&company.size)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Company> {
        sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Company not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Company not found".into()));
        }
        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }

    pub async fn list(&self, query: CompanyListQuery) -> Result<Listing<Company>> {
        let mut conditions = Vec::new();
        if let Some(industry) = query.industry {
            conditions.push(Condition::Eq("industry", Bind::Text(industry)));
        }
        if let Some(size) = query.size {
            conditions.push(Condition::Eq("size", Bind::Text(size)));
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            conditions.push(Condition::Search(SEARCH_FIELDS, search));
        }

        let request = ListRequest {
            conditions,
            ordering: parse_ordering(query.ordering.as_deref(), ORDERING_FIELDS, DEFAULT_ORDERING)?,
            page: Page::new(query.page, query.per_page),
        };
        fetch_page(&self.pool, "companies", COMPANY_COLUMNS, &request).await
    }

    /// Every company, name-ordered; feeds the vacancy form's company picker.
    pub async fn list_all(&self) -> Result<Vec<Company>> {
        let items = sqlx::query_as::<_, Company>(&format!(
            "SELECT {} FROM companies ORDER BY name ASC, id ASC",
            COMPANY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
