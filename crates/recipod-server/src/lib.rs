//! HTTP server for the podcast REST API and the recipe voice skill.
//!
//! Both surfaces are thin: handlers decode the request, make one store call
//! through a [`recipod_storage::Collection`], and serialize the result.
//! Every failure becomes HTTP 500 with a `{"message": ...}` body.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
