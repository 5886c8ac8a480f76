// Include controller tests
#[path = "controller_test.rs"]
mod controller_tests;

// Include integration tests
#[path = "integration_tests.rs"]
mod integration_tests;
