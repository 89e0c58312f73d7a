//! Voice-skill endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use recipod_skill::alexa::{dispatch, SkillRequest, SkillResponseEnvelope};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves one skill request envelope.
///
/// `POST /skill`
pub async fn handle_skill_request(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SkillResponseEnvelope>, ApiError> {
    let request: SkillRequest = serde_json::from_slice(&body)?;
    let envelope = dispatch(&state.skill, &request).await?;
    Ok(Json(envelope))
}
