//! Server-rendered HTML forms for vacancies and companies.
//!
//! Submissions go through the same services as the JSON API. Rejected
//! submissions are re-rendered with status 400, inline errors and the
//! submitted values; accepted ones redirect back to the list.

pub mod company;
pub mod vacancy;

use axum::response::Html;

use crate::error::{Error, Result};
use crate::utils::validation::FieldErrors;
use crate::views::{render_template, IndexView};

/// Key for errors that belong to the whole form rather than one field.
pub const NON_FIELD: &str = "__all__";

#[axum::debug_handler]
pub async fn index() -> Result<Html<String>> {
    render_template(&IndexView::default())
}

/// Turns a service error into inline form errors; anything else propagates.
pub(crate) fn into_form_errors(err: Error) -> Result<FieldErrors> {
    match err {
        Error::Validation(errors) => Ok(errors),
        Error::BadRequest(msg) | Error::Conflict(msg) => {
            let mut errors = FieldErrors::new();
            errors.add(NON_FIELD, msg);
            Ok(errors)
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_conflicts_become_form_level_errors() {
        let errors = into_form_errors(Error::Conflict("taken".into())).unwrap();
        assert_eq!(errors.get(NON_FIELD).unwrap()[0], "taken");
        assert!(into_form_errors(Error::NotFound("gone".into())).is_err());
    }

    #[test]
    fn validation_errors_pass_through_unchanged() {
        let mut fields = FieldErrors::new();
        fields.add("salary", "Salary must be a positive number");
        let errors = into_form_errors(Error::Validation(fields)).unwrap();
        assert!(errors.contains("salary"));
        assert!(!errors.contains(NON_FIELD));
    }
}
