use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Digits are ASCII only; the digit count below uses the same definition.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("valid phone pattern"));

pub const MIN_PHONE_DIGITS: usize = 9;
pub const MIN_FREE_TEXT_LEN: usize = 10;

/// Kind of input control, which decides the format checks applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    Email,
    Tel,
    TextArea,
}

/// Snapshot of one form control as read from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            value: value.into(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("this field is required")]
    Required,

    #[error("not a valid email address")]
    InvalidEmail,

    #[error("not a valid phone number")]
    InvalidPhone,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Check a single field. Format checks run on any non-empty value, even
/// when the field itself is optional.
pub fn validate_field(field: &FormField) -> Result<(), ValidationError> {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return Err(ValidationError::Required);
    }

    match field.kind {
        FieldKind::Email if !value.is_empty() && !is_valid_email(value) => {
            Err(ValidationError::InvalidEmail)
        }
        FieldKind::Tel if !value.is_empty() && !is_valid_phone(value) => {
            Err(ValidationError::InvalidPhone)
        }
        FieldKind::TextArea if field.required && value.chars().count() < MIN_FREE_TEXT_LEN => {
            Err(ValidationError::TooShort {
                min: MIN_FREE_TEXT_LEN,
            })
        }
        _ => Ok(()),
    }
}

/// Validate every field, returning the failures in form order
pub fn validate_all(fields: &[FormField]) -> Vec<(String, ValidationError)> {
    fields
        .iter()
        .filter_map(|field| validate_field(field).err().map(|e| (field.name.clone(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_reject_blank_values() {
        for kind in [FieldKind::Text, FieldKind::Select, FieldKind::Email, FieldKind::Tel] {
            let field = FormField::new("f", kind, "   ");
            assert_eq!(validate_field(&field), Err(ValidationError::Required));
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_email_field_is_trimmed_before_matching() {
        let field = FormField::new("email", FieldKind::Email, "  a@b.com ");
        assert_eq!(validate_field(&field), Ok(()));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("123456789"));
        assert!(!is_valid_phone("12345678"));
        assert!(is_valid_phone("(123) 456-7890"));
        assert!(is_valid_phone("+213 555 12 34 56"));
        assert!(!is_valid_phone("abc-defg"));
        assert!(!is_valid_phone("123456789x"));
    }

    #[test]
    fn test_free_text_minimum_length() {
        let short = FormField::new("motivation", FieldKind::TextArea, "  123456789  ");
        let long = FormField::new("motivation", FieldKind::TextArea, "1234567890");

        assert_eq!(
            validate_field(&short),
            Err(ValidationError::TooShort { min: 10 })
        );
        assert_eq!(validate_field(&long), Ok(()));
    }

    #[test]
    fn test_optional_fields() {
        let empty_email = FormField::new("email", FieldKind::Email, "").optional();
        let bad_phone = FormField::new("phone", FieldKind::Tel, "12").optional();
        let short_text = FormField::new("about", FieldKind::TextArea, "hi").optional();

        assert_eq!(validate_field(&empty_email), Ok(()));
        assert_eq!(validate_field(&bad_phone), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_field(&short_text), Ok(()));
    }

    #[test]
    fn test_validate_all_reports_each_failing_field() {
        let fields = vec![
            FormField::new("firstName", FieldKind::Text, "Jane"),
            FormField::new("lastName", FieldKind::Text, ""),
            FormField::new("email", FieldKind::Email, "jane@doe"),
        ];

        let failures = validate_all(&fields);
        assert_eq!(
            failures,
            vec![
                ("lastName".to_string(), ValidationError::Required),
                ("email".to_string(), ValidationError::InvalidEmail),
            ]
        );
    }
}
