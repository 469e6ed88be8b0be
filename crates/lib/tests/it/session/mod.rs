//! Session registry integration tests

mod registry_tests;
