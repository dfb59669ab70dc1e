//! Test utilities for route and use case testing.
//!
//! This module provides:
//! - An in-memory workspace client that records every forwarded entry
//! - A builder for `AppState` wired to those mocks

mod app_state_builder;
mod workspace_mocks;

pub use app_state_builder::*;
pub use workspace_mocks::*;
