use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::error::Error;
use crate::routes::forms::NON_FIELD;
use crate::utils::validation::FieldErrors;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// `axum::Json` whose rejections use the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Error::Validation(body_field_errors(&err.body_text())),
            JsonRejection::JsonSyntaxError(_) => Error::BadRequest("Malformed JSON body".into()),
            JsonRejection::MissingJsonContentType(_) => {
                Error::BadRequest("Expected `Content-Type: application/json`".into())
            }
            other => Error::BadRequest(other.body_text()),
        }
    }
}

/// Attributes a deserialization failure to the field it names, if any.
fn body_field_errors(detail: &str) -> FieldErrors {
    let detail = detail.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(detail);
    let detail = match detail.rfind(" at line ") {
        Some(pos) => &detail[..pos],
        None => detail,
    };

    let mut errors = FieldErrors::new();
    if let Some(rest) = detail.strip_prefix("missing field `") {
        let field = rest.split('`').next().unwrap_or_default();
        errors.add(field, "This field is required.");
    } else if let Some((path, message)) = detail
        .split_once(": ")
        .filter(|(path, _)| is_field_path(path))
    {
        errors.add(path, message);
    } else {
        errors.add(NON_FIELD, detail);
    }
    errors
}

fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_required() {
        let errors = body_field_errors(
            "Failed to deserialize the JSON body into the target type: missing field `student` at line 1 column 58",
        );
        assert_eq!(errors.get("student").unwrap()[0], "This field is required.");
    }

    #[test]
    fn type_errors_name_their_path() {
        let errors = body_field_errors(
            "Failed to deserialize the JSON body into the target type: salary: invalid type: string \"abc\", expected i64 at line 1 column 17",
        );
        assert_eq!(
            errors.get("salary").unwrap()[0],
            "invalid type: string \"abc\", expected i64"
        );
    }

    #[test]
    fn unattributed_errors_go_to_the_whole_body() {
        let errors = body_field_errors(
            "Failed to deserialize the JSON body into the target type: invalid type: sequence, expected struct CreateVacancyPayload at line 1 column 0",
        );
        assert!(errors.contains(NON_FIELD));
        assert!(!errors.contains("invalid type"));
    }
}
