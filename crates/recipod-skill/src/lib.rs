//! Voice-skill intent handling for recipe questions.
//!
//! [`IntentResolver`] maps an intent name plus its slot values to one query
//! against the recipes collection and formats the answer as a
//! [`SkillResponse`]. The [`alexa`] module carries the request/response
//! envelope the voice platform speaks, so the HTTP endpoint and the CLI
//! share one translation.

pub mod alexa;
pub mod error;
pub mod intent;
pub mod resolver;

pub use error::SkillError;
pub use intent::{Intent, Slots};
pub use resolver::{IntentResolver, SkillResponse};
