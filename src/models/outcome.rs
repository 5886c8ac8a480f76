use serde::{Deserialize, Serialize};

// Response body of the relay endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            message: None,
        }
    }
}

/// How a submission attempt ended.
///
/// `Unknown` covers the hidden-frame case where the form service answered
/// from another origin and the response could not be inspected. It is
/// treated as a success, but callers can still tell it apart from a
/// confirmed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Confirmed,
    Failed,
    Unknown,
}

impl SubmissionOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, SubmissionOutcome::Confirmed | SubmissionOutcome::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_omits_empty_message() {
        let body = serde_json::to_string(&SubmissionResult::failure()).unwrap();
        assert_eq!(body, r#"{"success":false}"#);
    }

    #[test]
    fn test_unknown_outcome_counts_as_success() {
        assert!(SubmissionOutcome::Unknown.is_success());
        assert!(SubmissionOutcome::Confirmed.is_success());
        assert!(!SubmissionOutcome::Failed.is_success());
    }
}
