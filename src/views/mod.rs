//! Askama view models for the server-rendered pages.

pub mod form;
pub mod lists;

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::database::listing::Listing;
use crate::error::Result;

pub use form::{FieldView, FormView};

/// Renders a template, logging and propagating failures as a 500.
pub fn render_template<T: Template>(template: &T) -> Result<Html<String>> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            Err(e.into())
        }
    }
}

/// Same as [`render_template`] but with status 400, for rejected submissions.
pub fn render_rejected<T: Template>(template: &T) -> Result<(StatusCode, Html<String>)> {
    Ok((StatusCode::BAD_REQUEST, render_template(template)?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub title: &'static str,
}

impl Default for IndexView {
    fn default() -> Self {
        Self { title: "Job board" }
    }
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteView {
    pub title: &'static str,
    pub what: String,
    pub action: String,
    pub back: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub page: i64,
    pub pages: i64,
    pub total: i64,
}

impl<T> From<&Listing<T>> for Pager {
    fn from(listing: &Listing<T>) -> Self {
        Self {
            page: listing.page,
            pages: listing.total_pages.max(1),
            total: listing.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_links_to_both_lists() {
        let html = render_template(&IndexView::default()).unwrap().0;
        assert!(html.contains("<title>Job board</title>"));
        assert!(html.contains("href=\"/vacancies/add\""));
        assert!(html.contains("href=\"/companies\""));
    }

    #[test]
    fn confirm_delete_escapes_the_object_name() {
        let view = ConfirmDeleteView {
            title: "Delete company",
            what: "company \"<b>Acme</b>\"".into(),
            action: "/companies/1/delete".into(),
            back: "/companies",
        };
        let (status, html) = render_rejected(&view).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.0.contains("&lt;b&gt;Acme&lt;/b&gt;"));
        assert!(!html.0.contains("<b>Acme</b>"));
    }

    #[test]
    fn pager_never_reports_zero_pages() {
        let listing: Listing<()> = Listing {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 20,
            total_pages: 0,
        };
        assert_eq!(Pager::from(&listing), Pager { page: 1, pages: 1, total: 0 });
    }
}
