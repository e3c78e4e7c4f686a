//! Foundation types for the stackc toolchain.
//!
//! This module provides fundamental types used throughout the compiler:
//! - [`Position`], [`SourceLocation`] - Line/column positions for declarations
//! - [`InternalError`] - Fatal internal-consistency failures
//! - Domain constants (custom type prefix, pseudo-parameters, primitive tags)
//!
//! This module has NO dependencies on other stackc modules.

pub mod constants;
mod error;
mod position;

pub use error::InternalError;
pub use position::{Position, SourceLocation};
