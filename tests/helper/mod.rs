//! Shared helpers for integration tests

#![allow(dead_code, unused_imports)]

pub mod project;
pub mod registry;

pub use project::{copy_fixture_project, create_test_project, fixture};
pub use registry::{MockRegistry, test_config};
