/**
 * Email Handlers
 *
 * HTTP handlers for the mail endpoints under /api/emails. Each handler
 * authenticates via the `AuthUser` extractor, validates the payload, and
 * delegates to one workflow operation; typed failures convert to
 * transport responses through `ApiError`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::auth::handlers::types::MessageResponse;
use crate::error::ApiError;
use crate::mail::email::{Draft, Email};
use crate::mail::handlers::types::{
    ForwardRequest, ReplyRequest, SaveDraftRequest, SaveDraftResponse, SendEmailRequest,
};
use crate::mail::workflow;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

/// POST /api/emails/send
pub async fn send_email(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SendEmailRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.receiver_ids.is_empty() {
        return Err(ApiError::InvalidInput(
            "at least one recipient is required".to_string(),
        ));
    }

    workflow::send_email(
        &state.db_pool,
        auth.user_id,
        &request.receiver_ids,
        request.cc.as_deref(),
        &request.subject,
        &request.body,
        request.draft_id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Email sent successfully")),
    ))
}

/// GET /api/emails/inbox
pub async fn get_inbox(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Email>>, ApiError> {
    let inbox = workflow::get_inbox(&state.db_pool, auth.user_id).await?;
    Ok(Json(inbox))
}

/// GET /api/emails/sent
pub async fn get_sent(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Email>>, ApiError> {
    let sent = workflow::get_sent(&state.db_pool, auth.user_id).await?;
    Ok(Json(sent))
}

/// GET /api/emails/trash
pub async fn get_trash(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Email>>, ApiError> {
    let trash = workflow::get_trash(&state.db_pool, auth.user_id).await?;
    Ok(Json(trash))
}

/// GET /api/emails/drafts
pub async fn list_drafts(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<Draft>>, ApiError> {
    let drafts = workflow::list_drafts(&state.db_pool, auth.user_id).await?;
    Ok(Json(drafts))
}

/// POST /api/emails/drafts
pub async fn save_draft(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SaveDraftRequest>,
) -> Result<(StatusCode, Json<SaveDraftResponse>), ApiError> {
    let draft_id = workflow::save_draft(
        &state.db_pool,
        auth.user_id,
        &request.receiver_ids,
        request.cc.as_deref(),
        &request.subject,
        &request.body,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveDraftResponse {
            message: "Draft saved successfully".to_string(),
            draft_id,
        }),
    ))
}

/// PUT /api/emails/read/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::mark_read(&state.db_pool, email_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Email marked as read")))
}

/// PUT /api/emails/unread/{id}
pub async fn mark_unread(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::mark_unread(&state.db_pool, email_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Email marked as unread")))
}

/// PUT /api/emails/important/{id}
pub async fn flag_important(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::flag_important(&state.db_pool, email_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Email flagged as important")))
}

/// PUT /api/emails/trash/{id}
pub async fn move_to_trash(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::move_to_trash(&state.db_pool, email_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Email moved to trash")))
}

/// PUT /api/emails/recover/{id}
pub async fn recover_email(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::recover_email(&state.db_pool, email_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Email recovered from trash")))
}

/// PUT /api/emails/move/{email_id}/folder/{folder_id}
pub async fn move_email_to_folder(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((email_id, folder_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    workflow::move_email_to_folder(&state.db_pool, email_id, auth.user_id, folder_id).await?;
    Ok(Json(MessageResponse::new("Email moved to folder successfully")))
}

/// POST /api/emails/reply/{id}
pub async fn reply(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    workflow::reply(&state.db_pool, email_id, auth.user_id, &request.body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Reply sent successfully")),
    ))
}

/// POST /api/emails/reply-all/{id}
pub async fn reply_all(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
    Json(request): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    workflow::reply_all(&state.db_pool, email_id, auth.user_id, &request.body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Reply All sent successfully")),
    ))
}

/// POST /api/emails/forward/{id}
pub async fn forward(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(email_id): Path<i64>,
    Json(request): Json<ForwardRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.receiver_ids.is_empty() {
        return Err(ApiError::InvalidInput(
            "at least one recipient is required".to_string(),
        ));
    }

    workflow::forward(
        &state.db_pool,
        email_id,
        auth.user_id,
        &request.receiver_ids,
        &request.body,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Email forwarded successfully")),
    ))
}
