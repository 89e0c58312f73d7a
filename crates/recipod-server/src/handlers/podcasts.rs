//! Podcast CRUD handlers (create, list, update, delete).

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use recipod_core::{DocumentId, Filter, Podcast, PodcastPatch};
use recipod_storage::{DeleteResult, InsertOneResult, UpdateResult};

use crate::error::ApiError;
use crate::state::AppState;

/// Parses the `{id}` path segment.
///
/// An unparsable id is not an error: it becomes the nil id, which matches
/// no document, so the store acknowledges zero matches. That includes a
/// segment the extractor itself rejected, such as one that percent-decodes
/// to invalid UTF-8.
fn path_id(raw: Result<Path<String>, PathRejection>) -> DocumentId {
    let raw = match raw {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            tracing::debug!(%rejection, "path id rejected, using nil id");
            return DocumentId::nil();
        }
    };
    let id = DocumentId::parse_or_nil(&raw);
    if id.is_nil() {
        tracing::debug!(raw, "path id is not a document id, using nil id");
    }
    id
}

/// Creates a podcast. Any client-supplied `_id` is discarded.
///
/// `POST /podcast`
pub async fn create_podcast(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InsertOneResult>, ApiError> {
    let podcast: Podcast = serde_json::from_slice(&body)?;
    let ack = state.podcasts.insert_as(&podcast.into_new()).await?;
    tracing::info!(id = %ack.inserted_id, "podcast created");
    Ok(Json(ack))
}

/// Lists every podcast.
///
/// `GET /podcasts`
pub async fn list_podcasts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Podcast>>, ApiError> {
    let podcasts = state.podcasts.find_many_as(&Filter::All).await?;
    Ok(Json(podcasts))
}

/// Sets the fields present in the body; absent fields keep their values.
///
/// `PUT /podcast/{id}`
pub async fn update_podcast(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<UpdateResult>, ApiError> {
    let id = path_id(id);
    let patch: PodcastPatch = serde_json::from_slice(&body)?;
    let ack = state
        .podcasts
        .update_one(&Filter::by_id(id), patch.to_set_document()?)
        .await?;
    Ok(Json(ack))
}

/// Deletes a podcast by id.
///
/// `DELETE /podcast/{id}`
pub async fn delete_podcast(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResult>, ApiError> {
    let id = path_id(id);
    let ack = state.podcasts.delete_one(&Filter::by_id(id)).await?;
    Ok(Json(ack))
}
