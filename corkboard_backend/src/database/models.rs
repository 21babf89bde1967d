use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub poster_name: String,
    pub content: String,
    /// None for a top-level post. May reference a post that has since been
    /// deleted; the store does not reconcile dangling references.
    pub reply_to_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
