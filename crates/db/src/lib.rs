//! Assignment model structs and DTOs.
//!
//! The persistence layer hydrates [`models::assignment::Assignment`] rows
//! (via `sqlx::FromRow` or a JSON attribute map); request payloads are
//! validated into the create/update DTOs before any write happens.

pub mod models;
