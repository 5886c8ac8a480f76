pub mod outcome;
pub mod registration;
