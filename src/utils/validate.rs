use crate::types::error::AppError;
use serde_json::json;
use std::collections::BTreeMap;

/// Accumulates per-field validation failures, mirroring the field-keyed
/// error map the API returns on 422.
#[derive(Default)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Non-empty check; returns whether the value passed so later rules
    /// can be skipped for absent fields.
    pub fn require(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, "is required");
            return false;
        }
        true
    }

    pub fn require_email(&mut self, field: &'static str, value: &str) {
        if !self.require(field, value) {
            return;
        }
        if !looks_like_email(value) {
            self.add(field, "must be a valid email address");
        }
    }

    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(field, format!("must be at least {min} characters"));
        }
    }

    pub fn max_len(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("must not be longer than {max} characters"));
        }
    }

    pub fn confirmed(&mut self, field: &'static str, value: &str, confirmation: &str) {
        if value != confirmation {
            self.add(field, "does not match the confirmation");
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(json!(self.errors)))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_errors_pass() {
        assert!(FieldErrors::new().finish().is_ok());
    }

    #[test]
    fn collected_errors_key_by_field() {
        let mut errors = FieldErrors::new();
        errors.require("name", "");
        errors.require_email("email", "not-an-email");
        let err = errors.finish().unwrap_err();
        let AppError::Validation(map) = err else {
            panic!("expected validation error");
        };
        assert!(map.get("name").is_some());
        assert!(map.get("email").is_some());
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("ana@x.com"));
        assert!(looks_like_email("a.b+c@sub.domain.org"));
        assert!(!looks_like_email("ana"));
        assert!(!looks_like_email("ana@"));
        assert!(!looks_like_email("@x.com"));
        assert!(!looks_like_email("ana@nodot"));
        assert!(!looks_like_email("ana @x.com"));
    }
}
