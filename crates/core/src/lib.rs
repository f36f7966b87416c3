//! Domain types and rules for assignments.
//!
//! Has no internal dependencies so the model layer and the HTTP boundary can
//! both build on it.

pub mod assignment;
pub mod error;
pub mod types;
