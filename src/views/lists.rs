use askama::Template;
use uuid::Uuid;

use super::Pager;
use crate::database::listing::Listing;
use crate::models::{company::Company, vacancy::Vacancy};

pub struct VacancyRow {
    pub id: Uuid,
    pub title: String,
    pub salary: i64,
    pub status: String,
    pub published: String,
}

impl From<&Vacancy> for VacancyRow {
    fn from(vacancy: &Vacancy) -> Self {
        Self {
            id: vacancy.id,
            title: vacancy.title.clone(),
            salary: vacancy.salary,
            status: vacancy.status.to_string(),
            published: vacancy.published_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "vacancy_list.html")]
pub struct VacancyListView {
    pub title: &'static str,
    pub rows: Vec<VacancyRow>,
    pub pager: Pager,
}

impl From<&Listing<Vacancy>> for VacancyListView {
    fn from(listing: &Listing<Vacancy>) -> Self {
        Self {
            title: "Vacancies",
            rows: listing.items.iter().map(VacancyRow::from).collect(),
            pager: Pager::from(listing),
        }
    }
}

pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub industry: String,
    pub email: String,
}

impl From<&Company> for CompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            industry: company.industry.clone(),
            email: company.email.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "company_list.html")]
pub struct CompanyListView {
    pub title: &'static str,
    pub rows: Vec<CompanyRow>,
    pub pager: Pager,
}

impl From<&Listing<Company>> for CompanyListView {
    fn from(listing: &Listing<Company>) -> Self {
        Self {
            title: "Companies",
            rows: listing.items.iter().map(CompanyRow::from).collect(),
            pager: Pager::from(listing),
        }
    }
}
