//! Shared test helpers.

pub mod module_fixtures;
