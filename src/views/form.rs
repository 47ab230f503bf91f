use askama::Template;

use crate::routes::forms::NON_FIELD;
use crate::utils::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One labelled widget. `kind` is an `<input>` type, `"textarea"` or `"select"`.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub label: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub value: String,
    pub options: Vec<SelectOption>,
    pub errors: Vec<String>,
}

impl FieldView {
    pub fn input(label: &'static str, name: &'static str, kind: &'static str, value: &str) -> Self {
        Self {
            label,
            name,
            kind,
            value: value.to_string(),
            options: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn textarea(label: &'static str, name: &'static str, value: &str) -> Self {
        Self::input(label, name, "textarea", value)
    }

    /// `options` are `(value, label)` pairs.
    pub fn select<I>(label: &'static str, name: &'static str, options: I, selected: &str) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let options = options
            .into_iter()
            .map(|(value, label)| SelectOption {
                selected: value == selected,
                value,
                label,
            })
            .collect();
        Self {
            options,
            ..Self::input(label, name, "select", selected)
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormView {
    pub title: &'static str,
    pub action: String,
    pub submit: &'static str,
    pub fields: Vec<FieldView>,
    pub non_field_errors: Vec<String>,
}

impl FormView {
    pub fn new(title: &'static str, action: impl Into<String>, submit: &'static str) -> Self {
        Self {
            title,
            action: action.into(),
            submit,
            fields: Vec::new(),
            non_field_errors: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldView) -> Self {
        self.fields.push(field);
        self
    }

    /// Attaches messages to their fields; unknown keys land above the form.
    pub fn with_errors(mut self, errors: &FieldErrors) -> Self {
        for field in &mut self.fields {
            if let Some(messages) = errors.get(field.name) {
                field.errors = messages.to_vec();
            }
        }
        if let Some(messages) = errors.get(NON_FIELD) {
            self.non_field_errors = messages.to_vec();
        }
        self
    }
}
