//! Shared functionality
//!
//! Error kinds and small value types used by every imgembed crate.
//!

pub mod errors;
pub mod types;
