use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Logical fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    FirstName,
    LastName,
    Gender,
    Email,
    PhoneNumber,
    AcademicYear,
    System,
    AboutYourself,
    Motivation,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 9] = [
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::Gender,
        RegistrationField::Email,
        RegistrationField::PhoneNumber,
        RegistrationField::AcademicYear,
        RegistrationField::System,
        RegistrationField::AboutYourself,
        RegistrationField::Motivation,
    ];

    /// Name of the field as it appears in the form and in JSON payloads
    pub fn form_name(self) -> &'static str {
        match self {
            RegistrationField::FirstName => "firstName",
            RegistrationField::LastName => "lastName",
            RegistrationField::Gender => "gender",
            RegistrationField::Email => "email",
            RegistrationField::PhoneNumber => "phoneNumber",
            RegistrationField::AcademicYear => "academicYear",
            RegistrationField::System => "system",
            RegistrationField::AboutYourself => "aboutYourself",
            RegistrationField::Motivation => "motivation",
        }
    }

    pub fn from_form_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.form_name() == name)
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

// A single sign-up. Missing fields are accepted and forwarded as empty
// strings; non-string scalars are forwarded as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationSubmission {
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_text")]
    pub academic_year: String,
    #[serde(deserialize_with = "lenient_text")]
    pub system: String,
    #[serde(deserialize_with = "lenient_text")]
    pub about_yourself: String,
    #[serde(deserialize_with = "lenient_text")]
    pub motivation: String,
}

/// Accept any JSON value as field text: `null` is empty, numbers and
/// booleans keep their literal form, arrays and objects their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl RegistrationSubmission {
    pub fn value(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::FirstName => &self.first_name,
            RegistrationField::LastName => &self.last_name,
            RegistrationField::Gender => &self.gender,
            RegistrationField::Email => &self.email,
            RegistrationField::PhoneNumber => &self.phone_number,
            RegistrationField::AcademicYear => &self.academic_year,
            RegistrationField::System => &self.system,
            RegistrationField::AboutYourself => &self.about_yourself,
            RegistrationField::Motivation => &self.motivation,
        }
    }

    /// JSON body for the relay endpoint, keyed by form name
    pub fn to_json(&self) -> Value {
        let fields: Map<String, Value> = RegistrationField::ALL
            .into_iter()
            .map(|field| {
                let value = Value::String(self.value(field).to_string());
                (field.form_name().to_string(), value)
            })
            .collect();
        Value::Object(fields)
    }

    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        let slot = match field {
            RegistrationField::FirstName => &mut self.first_name,
            RegistrationField::LastName => &mut self.last_name,
            RegistrationField::Gender => &mut self.gender,
            RegistrationField::Email => &mut self.email,
            RegistrationField::PhoneNumber => &mut self.phone_number,
            RegistrationField::AcademicYear => &mut self.academic_year,
            RegistrationField::System => &mut self.system,
            RegistrationField::AboutYourself => &mut self.about_yourself,
            RegistrationField::Motivation => &mut self.motivation,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let submission: RegistrationSubmission =
            serde_json::from_value(json!({ "firstName": "Jane" })).unwrap();

        assert_eq!(submission.first_name, "Jane");
        assert_eq!(submission.last_name, "");
        assert_eq!(submission.phone_number, "");
    }

    #[test]
    fn test_scalar_fields_are_taken_as_text() {
        let submission: RegistrationSubmission = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": null,
            "phoneNumber": 123456789,
            "system": true
        }))
        .unwrap();

        assert_eq!(submission.last_name, "");
        assert_eq!(submission.phone_number, "123456789");
        assert_eq!(submission.system, "true");
    }

    #[test]
    fn test_json_body_uses_form_names() {
        let mut submission = RegistrationSubmission::default();
        submission.set(RegistrationField::PhoneNumber, "0555 12 34 56");

        let body = submission.to_json();
        assert_eq!(body["phoneNumber"], "0555 12 34 56");
        assert_eq!(body["firstName"], "");
        assert_eq!(body.as_object().unwrap().len(), RegistrationField::ALL.len());
    }

    #[test]
    fn test_form_name_lookup() {
        assert_eq!(
            RegistrationField::from_form_name("phoneNumber"),
            Some(RegistrationField::PhoneNumber)
        );
        assert_eq!(RegistrationField::from_form_name("phone_number"), None);
    }
}
