//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! order desk test suite.
//!
//! # Modules
//!
//! - `fixtures`: The sample menu and a wired-up order desk
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for invoices and money
//! - `generators`: Property-based test data generators
//! - `logging`: Test subscriber setup

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_test_tracing;
