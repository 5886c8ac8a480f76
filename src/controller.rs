//! Registration form controller.
//!
//! The controller owns the submit flow of the registration form: it
//! validates fields, marks the ones that fail, sends the submission through
//! the configured transport and reports the outcome. It never touches the
//! page directly; everything goes through a [`PageAdapter`] handed in at
//! construction, and the host forwards page events to the `on_*` methods.

use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::mapping::FieldMapping;
use crate::models::outcome::{SubmissionOutcome, SubmissionResult};
use crate::models::registration::{RegistrationField, RegistrationSubmission};
use crate::validation::{validate_field, FormField, ValidationError};

pub const FORM_ID: &str = "registrationForm";
pub const FRAME_ID: &str = "hidden_iframe";
pub const MESSAGE_ID: &str = "formMessage";

pub const DEFAULT_FRAME_ACTION: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLScmQ5j2KLqjnychz3PKwL3BY_isse6RIZjxcyFKw50Ah3PIsw/formResponse";

/// How a validated submission leaves the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTransport {
    /// Post the encoded form into the hidden frame, straight to the form service
    HiddenFrame { action_url: String },
    /// Post the submission as JSON to the relay endpoint
    Relay { endpoint: String },
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub transport: SubmitTransport,
    pub mapping: FieldMapping,
    pub success_message: String,
    pub invalid_message: String,
    pub failure_message: String,
    pub dismiss_after: Duration,
    pub fade_duration: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            transport: SubmitTransport::HiddenFrame {
                action_url: DEFAULT_FRAME_ACTION.to_string(),
            },
            mapping: FieldMapping::page_default(),
            success_message: "Thank you for joining! We'll be in touch soon.".to_string(),
            invalid_message: "Please fill in all required fields correctly.".to_string(),
            failure_message: "Something went wrong. Please try again.".to_string(),
            dismiss_after: Duration::from_secs(5),
            fade_duration: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// What the page could tell about the hidden frame after it loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameInspection {
    Loaded,
    Errored,
    /// The frame holds a cross-origin document and cannot be read
    AccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    HideMessage,
    ClearMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Sent,
    Blocked(Vec<(String, ValidationError)>),
    AlreadyPending,
}

/// Reply of the relay endpoint as seen by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub status: u16,
    pub body: Option<SubmissionResult>,
}

/// Capabilities the controller needs from the page
#[cfg_attr(test, mockall::automock)]
pub trait PageAdapter {
    fn has_element(&self, id: &str) -> bool;
    fn form_fields(&self) -> Vec<FormField>;
    /// Mark a field and its container as invalid, or clear the mark
    fn set_field_invalid(&mut self, name: &str, invalid: bool);
    /// Disable the submit control and show the loading indicator, or undo it
    fn set_loading(&mut self, loading: bool);
    fn show_message(&mut self, kind: MessageKind, text: &str);
    /// Start fading the message out
    fn hide_message(&mut self);
    fn clear_message(&mut self);
    fn reset_form(&mut self);
    fn post_to_frame(&mut self, action_url: &str, pairs: &[(String, String)]);
    fn post_json(&mut self, url: &str, body: &str);
    fn inspect_frame(&self) -> FrameInspection;
    fn schedule(&mut self, delay: Duration, task: ScheduledTask);
}

pub struct FormController<P: PageAdapter> {
    page: P,
    config: ControllerConfig,
    invalid: HashSet<String>,
    submitting: bool,
}

impl<P: PageAdapter> FormController<P> {
    /// Bind to the registration form. Returns `None` when the page has no
    /// such form, in which case there is nothing to control.
    pub fn attach(page: P, config: ControllerConfig) -> Option<Self> {
        if !page.has_element(FORM_ID) {
            debug!("No registration form on this page");
            return None;
        }

        if matches!(config.transport, SubmitTransport::HiddenFrame { .. })
            && !page.has_element(FRAME_ID)
        {
            warn!("Hidden frame is missing, submissions will never complete");
        }
        if !page.has_element(MESSAGE_ID) {
            warn!("Message area is missing, results will not be visible");
        }

        Some(Self {
            page,
            config,
            invalid: HashSet::new(),
            submitting: false,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_marked_invalid(&self, name: &str) -> bool {
        self.invalid.contains(name)
    }

    /// Validate one field and update its invalid mark
    pub fn validate_field(&mut self, field: &FormField) -> Result<(), ValidationError> {
        let result = validate_field(field);
        let invalid = result.is_err();

        self.page.set_field_invalid(&field.name, invalid);
        if invalid {
            self.invalid.insert(field.name.clone());
        } else {
            self.invalid.remove(&field.name);
        }

        result
    }

    pub fn on_field_blur(&mut self, name: &str) {
        if let Some(field) = self.find_field(name) {
            let _ = self.validate_field(&field);
        }
    }

    /// Fields already marked invalid are rechecked as the user types
    pub fn on_field_input(&mut self, name: &str) {
        if !self.invalid.contains(name) {
            return;
        }
        if let Some(field) = self.find_field(name) {
            let _ = self.validate_field(&field);
        }
    }

    pub fn on_submit(&mut self) -> SubmitDecision {
        if self.submitting {
            debug!("Submission already in flight, ignoring submit");
            return SubmitDecision::AlreadyPending;
        }

        let fields = self.page.form_fields();
        let failures: Vec<(String, ValidationError)> = fields
            .iter()
            .filter_map(|field| {
                self.validate_field(field)
                    .err()
                    .map(|e| (field.name.clone(), e))
            })
            .collect();

        if !failures.is_empty() {
            warn!("Form validation failed for {} field(s)", failures.len());
            let text = self.config.invalid_message.clone();
            self.page.show_message(MessageKind::Error, &text);
            return SubmitDecision::Blocked(failures);
        }

        info!("Validation passed, submitting registration");
        self.submitting = true;
        self.page.set_loading(true);
        self.page.hide_message();

        let submission = collect_submission(&fields);
        let transport = self.config.transport.clone();
        match &transport {
            SubmitTransport::HiddenFrame { action_url } => {
                let pairs = self.config.mapping.encode(&submission);
                self.page.post_to_frame(action_url, &pairs);
            }
            SubmitTransport::Relay { endpoint } => {
                let body = submission.to_json().to_string();
                self.page.post_json(endpoint, &body);
            }
        }

        SubmitDecision::Sent
    }

    /// The hidden frame finished loading. Loads that are not the answer to
    /// a submission, such as the frame's initial page, return `None`.
    pub fn on_frame_load(&mut self) -> Option<SubmissionOutcome> {
        if !self.submitting {
            debug!("Frame loaded with no submission in flight");
            return None;
        }

        let outcome = match self.page.inspect_frame() {
            FrameInspection::Loaded => SubmissionOutcome::Confirmed,
            FrameInspection::Errored => SubmissionOutcome::Failed,
            // The response came from the form service's origin; delivery
            // cannot be checked, so it is assumed.
            FrameInspection::AccessDenied => SubmissionOutcome::Unknown,
        };

        self.finish(outcome);
        Some(outcome)
    }

    pub fn on_relay_response(
        &mut self,
        reply: Result<RelayReply, String>,
    ) -> Option<SubmissionOutcome> {
        if !self.submitting {
            debug!("Relay response with no submission in flight");
            return None;
        }

        let outcome = match reply {
            Ok(RelayReply {
                status: 200,
                body: Some(SubmissionResult { success: true, .. }),
            }) => SubmissionOutcome::Confirmed,
            Ok(reply) => {
                warn!("Relay rejected the submission with status {}", reply.status);
                SubmissionOutcome::Failed
            }
            Err(e) => {
                warn!("Relay request failed: {}", e);
                SubmissionOutcome::Failed
            }
        };

        self.finish(outcome);
        Some(outcome)
    }

    pub fn run_scheduled(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::HideMessage => {
                self.page.hide_message();
                self.page
                    .schedule(self.config.fade_duration, ScheduledTask::ClearMessage);
            }
            ScheduledTask::ClearMessage => self.page.clear_message(),
        }
    }

    fn finish(&mut self, outcome: SubmissionOutcome) {
        self.submitting = false;
        self.page.set_loading(false);

        if outcome.is_success() {
            info!("Registration submitted ({:?})", outcome);
            self.page.reset_form();
            self.invalid.clear();
            let text = self.config.success_message.clone();
            self.page.show_message(MessageKind::Success, &text);
            self.page
                .schedule(self.config.dismiss_after, ScheduledTask::HideMessage);
        } else {
            let text = self.config.failure_message.clone();
            self.page.show_message(MessageKind::Error, &text);
        }
    }

    fn find_field(&self, name: &str) -> Option<FormField> {
        self.page
            .form_fields()
            .into_iter()
            .find(|field| field.name == name)
    }
}

/// Build a submission from the form's fields, matched by name
pub fn collect_submission(fields: &[FormField]) -> RegistrationSubmission {
    let mut submission = RegistrationSubmission::default();
    for field in fields {
        match RegistrationField::from_form_name(&field.name) {
            Some(key) => submission.set(key, field.value.as_str()),
            None => debug!("Ignoring unknown form field {}", field.name),
        }
    }
    submission
}
