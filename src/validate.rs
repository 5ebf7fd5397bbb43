//! Form Validation
//!
//! Field-level checks applied before submission; failures render as
//! inline errors and never reach the toast layer.

use std::collections::HashMap;

/// Field name -> first error message for that field.
pub type FieldErrors = HashMap<&'static str, String>;

pub fn required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.entry(field).or_insert_with(|| "This field is required".to_string());
    }
}

pub fn max_len(errors: &mut FieldErrors, field: &'static str, value: &str, limit: usize) {
    if value.chars().count() > limit {
        errors
            .entry(field)
            .or_insert_with(|| format!("Must be {} characters or fewer", limit));
    }
}

/// Shape check only; the backend remains the authority. Empty values
/// pass so optional email fields validate cleanly.
pub fn email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !is_valid_email(value) {
        errors
            .entry(field)
            .or_insert_with(|| "Enter a valid email address".to_string());
    }
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "title", "   ");
        required(&mut errors, "name", "ok");
        assert!(errors.contains_key("title"));
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_max_len() {
        let mut errors = FieldErrors::new();
        max_len(&mut errors, "title", "abcdef", 5);
        max_len(&mut errors, "slug", "abcde", 5);
        assert!(errors.contains_key("title"));
        assert!(!errors.contains_key("slug"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@exa mple.com"));
        assert!(!is_valid_email("ada@@example.com"));
    }

    #[test]
    fn test_optional_email_passes_when_empty() {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", "");
        assert!(errors.is_empty());
        email(&mut errors, "email", "nonsense");
        assert!(errors.contains_key("email"));
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = FieldErrors::new();
        required(&mut errors, "title", "");
        max_len(&mut errors, "title", "", 0);
        assert_eq!(errors["title"], "This field is required");
    }
}
