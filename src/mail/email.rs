/**
 * Email and Draft Models
 *
 * Canonical email records are independent of folder placement; placement
 * lives in the `email_folders` association table. A multi-recipient send
 * produces one email row per recipient, so read/important/trash state is
 * always per-recipient.
 *
 * Drafts are a separate entity: they hold their recipient list as text
 * and have no folder placement until promoted to sent.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An email row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Email {
    /// Unique email ID
    pub id: i64,
    /// Sending user ID
    pub sender_id: i64,
    /// Receiving user ID
    pub receiver_id: i64,
    /// Raw comma-separated CC address list, if any
    pub cc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
    /// Read flag (receiver-controlled)
    pub is_read: bool,
    /// Important flag (sender- or receiver-controlled)
    pub is_important: bool,
    /// Set when the sender or receiver account was soft-deleted
    pub is_user_deleted: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Trash timestamp (null = not trashed)
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A draft row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Draft {
    /// Unique draft ID
    pub id: i64,
    /// Authoring user ID
    pub sender_id: i64,
    /// Comma-joined recipient user IDs
    pub recipients: String,
    /// Raw comma-separated CC address list, if any
    pub cc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-saved timestamp
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    /// Parse the stored recipient list back into user IDs
    ///
    /// Entries that do not parse are dropped; the list was written by
    /// `save_draft` from validated IDs, so this is a decode guard only.
    pub fn recipient_ids(&self) -> Vec<i64> {
        self.recipients
            .split(',')
            .filter_map(|s| s.trim().parse::<i64>().ok())
            .collect()
    }

    /// Join recipient IDs into the stored text form
    pub fn join_recipients(ids: &[i64]) -> String {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
