use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - an append-only child record of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields supplied when posting a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub user_email: String,
    pub user_id: String,
}
