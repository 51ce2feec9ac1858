//! # tinkerglot-common
//!
//! Foundation layer for Tinkerglot: the error taxonomy and the enums that
//! name translation targets.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Target languages and translation modes
//! - [`utils`] - Utility functions and helpers (errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{Language, Mode};
pub use utils::error::{Error, Result};
