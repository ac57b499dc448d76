//! # ASSIST Shared
//!
//! Agreement payload model, course codes, output rows and configuration used
//! across the extraction crates.

pub mod config;
pub mod course;
pub mod error;
pub mod lenient;
pub mod payload;
pub mod row;

// Re-exports
pub use config::*;
pub use course::*;
pub use error::*;
pub use payload::*;
pub use row::*;
