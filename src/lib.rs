//! Club Registration Relay
//!
//! This library implements the registration flow of the club's website:
//! a form controller that validates and submits the sign-up form, and an
//! HTTP relay that forwards submissions to an external form service as a
//! URL-encoded form post.
//!
//! # Modules
//!
//! - `controller`: form controller working through an injected `PageAdapter`
//! - `validation`: field rules shared by the controller
//! - `mapping`: logical field names to the form service's entry identifiers
//! - `client`: `FormServiceClient` posting submissions upstream
//! - `handlers`, `routes`: the axum relay endpoint
//!
//! # Outcomes
//!
//! A hidden-frame submission usually cannot be confirmed, because the form
//! service answers from another origin. Such submissions end in
//! `SubmissionOutcome::Unknown`, which counts as a success but stays
//! distinguishable from `SubmissionOutcome::Confirmed`.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod routes;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export the main API types for ease of use
pub use client::FormServiceClient;
pub use controller::{ControllerConfig, FormController, PageAdapter, SubmitTransport};
pub use handlers::relay::AppState;
pub use mapping::FieldMapping;
pub use models::outcome::{SubmissionOutcome, SubmissionResult};
pub use models::registration::{RegistrationField, RegistrationSubmission};
pub use routes::create_router;
