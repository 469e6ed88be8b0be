//! File-backed store integration tests
//!
//! These mirror how the command line tool keeps users and admin credentials on disk.

mod file_tests;
