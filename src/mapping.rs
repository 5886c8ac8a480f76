use crate::models::registration::{RegistrationField, RegistrationSubmission};

/// Maps logical form fields to the opaque entry identifiers of the external
/// form service.
///
/// The mapping is fixed at deployment time. If the form owner edits the
/// external form, the identifiers change and submissions silently stop
/// landing in the right columns; nothing here can detect that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(RegistrationField, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace the identifier for a field. Insertion order is kept
    /// and becomes the order of the encoded body.
    pub fn with(mut self, field: RegistrationField, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = identifier,
            None => self.entries.push((field, identifier)),
        }
        self
    }

    /// Mapping used by the relay endpoint's form
    pub fn relay_default() -> Self {
        Self::new()
            .with(RegistrationField::FirstName, "entry.368558942")
            .with(RegistrationField::LastName, "entry.1809475310")
            .with(RegistrationField::Email, "entry.262113261")
            .with(RegistrationField::PhoneNumber, "entry.530200106")
    }

    /// Mapping used by the full registration form on the page
    pub fn page_default() -> Self {
        Self::new()
            .with(RegistrationField::FirstName, "entry.2047506724")
            .with(RegistrationField::LastName, "entry.869392316")
            .with(RegistrationField::Gender, "entry.1909484609")
            .with(RegistrationField::Email, "entry.1375451342")
            .with(RegistrationField::PhoneNumber, "entry.916565930")
            .with(RegistrationField::AcademicYear, "entry.2063032020")
            .with(RegistrationField::System, "entry.1675208490")
            .with(RegistrationField::AboutYourself, "entry.1000529810")
            .with(RegistrationField::Motivation, "entry.1517384005")
    }

    pub fn identifier(&self, field: RegistrationField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a submission as form pairs, one per mapped field.
    /// Fields without an identifier are dropped.
    pub fn encode(&self, submission: &RegistrationSubmission) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(field, id)| (id.clone(), submission.value(*field).to_string()))
            .collect()
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::relay_default()
    }
}
