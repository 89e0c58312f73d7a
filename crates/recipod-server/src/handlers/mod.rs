//! HTTP handler modules.
//!
//! Handlers take the body as raw bytes and decode it themselves, so a
//! malformed payload surfaces as [`ApiError::Decode`](crate::error::ApiError)
//! (HTTP 500) rather than an extractor rejection with its own status.

pub mod podcasts;
pub mod skill;
