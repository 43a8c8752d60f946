/**
 * Folder Handlers
 *
 * HTTP handlers for the folder endpoints under /api/emails/folders.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::auth::handlers::types::MessageResponse;
use crate::error::ApiError;
use crate::mail::folders::Folder;
use crate::mail::handlers::types::{CreateFolderRequest, RenameFolderRequest};
use crate::mail::workflow;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

/// GET /api/emails/folders
pub async fn list_folders(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Folder>>, ApiError> {
    let folders = workflow::list_folders(&state.db_pool, auth.user_id).await?;
    Ok(Json(folders))
}

/// POST /api/emails/folders
pub async fn create_folder(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), ApiError> {
    let folder = workflow::create_folder(&state.db_pool, auth.user_id, &request.name).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// PUT /api/emails/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(folder_id): Path<i64>,
    Json(request): Json<RenameFolderRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::rename_folder(&state.db_pool, folder_id, auth.user_id, &request.new_name).await?;
    Ok(Json(MessageResponse::new("Folder renamed successfully")))
}

/// DELETE /api/emails/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(folder_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::delete_folder(&state.db_pool, folder_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Folder deleted successfully")))
}
