//! Flattening of `validator` errors into a list of per-field messages.
//!
//! Input DTOs derive [`validator::Validate`]. The derived errors are a tree
//! (nested structs, list items); the API reports them as a flat list with
//! dotted/indexed paths such as `vendors[1].name`.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// One failing field of a validated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join field errors into a single human-readable line.
pub fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten a `ValidationErrors` tree, sorted by field path.
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldError::new(path.clone(), describe(err)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => match err.code.as_ref() {
            "length" => length_message(err),
            "url" => "must be a valid URL".to_string(),
            "range" => "is out of range".to_string(),
            other => format!("is invalid ({other})"),
        },
    }
}

fn length_message(err: &ValidationError) -> String {
    let min = err.params.get("min").and_then(|v| v.as_u64());
    let max = err.params.get("max").and_then(|v| v.as_u64());
    match (min, max) {
        (Some(1), Some(max)) => format!("must not be empty and at most {max} characters"),
        (Some(min), Some(max)) => format!("must be between {min} and {max} characters"),
        (Some(1), None) => "must not be empty".to_string(),
        (Some(min), None) => format!("must be at least {min} characters"),
        (None, Some(max)) => format!("must be at most {max} characters"),
        (None, None) => "has an invalid length".to_string(),
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(flatten(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Line {
        #[validate(length(min = 1, max = 10))]
        name: String,
    }

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, max = 5))]
        title: String,
        #[validate(url)]
        link: Option<String>,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    #[test]
    fn every_failing_field_is_reported() {
        let form = Form {
            title: String::new(),
            link: Some("not a url".into()),
            lines: vec![],
        };
        let errors = flatten(&form.validate().unwrap_err());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["link", "title"]);
        assert_eq!(errors[0].message, "must be a valid URL");
        assert_eq!(errors[1].message, "must not be empty and at most 5 characters");
    }

    #[test]
    fn nested_list_items_carry_their_index() {
        let form = Form {
            title: "ok".into(),
            link: None,
            lines: vec![
                Line { name: "fine".into() },
                Line { name: String::new() },
            ],
        };
        let errors = flatten(&form.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "lines[1].name");
    }

    #[test]
    fn converts_into_core_error() {
        let form = Form {
            title: String::new(),
            link: None,
            lines: vec![],
        };
        let err: CoreError = form.validate().unwrap_err().into();
        match err {
            CoreError::InvalidFields(fields) => assert_eq!(fields[0].field, "title"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn summarize_joins_with_semicolons() {
        let line = summarize(&[FieldError::new("a", "x"), FieldError::new("b", "y")]);
        assert_eq!(line, "a: x; b: y");
    }
}
