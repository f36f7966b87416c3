//! HTTP boundary adapter for assignment request and response shapes.
//!
//! Exposes the building blocks (config, error mapping, validating extractor,
//! response envelope) that request handlers and integration tests share.

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
