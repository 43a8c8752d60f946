/**
 * Mail Handler Types
 *
 * Request types for the mail and folder endpoints. Bodies use camelCase
 * keys to match the web client; email and folder rows serialize with
 * their column names.
 */

use serde::{Deserialize, Serialize};

/// Send request; `draft_id` consumes a saved draft in the same operation
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub receiver_ids: Vec<i64>,
    #[serde(default)]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub draft_id: Option<i64>,
}

/// Save-draft request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    pub receiver_ids: Vec<i64>,
    #[serde(default)]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Response for a saved draft
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftResponse {
    pub message: String,
    pub draft_id: i64,
}

/// Reply and reply-all request
#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyRequest {
    pub body: String,
}

/// Forward request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRequest {
    pub receiver_ids: Vec<i64>,
    pub body: String,
}

/// Create-folder request
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

/// Rename-folder request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFolderRequest {
    pub new_name: String,
}
