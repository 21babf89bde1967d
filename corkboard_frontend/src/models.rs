use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub poster_name: String,
    pub content: String,
    #[serde(default)]
    pub reply_to_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub replies: Vec<PostView>,
    #[serde(default)]
    pub reply_to: Option<Box<PostView>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub poster_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_view_parses_the_wire_shape() {
        let raw = r#"{
            "id": "b1",
            "posterName": "Bob",
            "content": "Hi Alice",
            "replyToId": "a1",
            "createdAt": "2024-01-01T00:00:01+00:00",
            "updatedAt": "2024-01-01T00:00:01+00:00",
            "replies": [],
            "replyTo": {
                "id": "a1",
                "posterName": "Alice",
                "content": "Hello",
                "createdAt": "2024-01-01T00:00:00+00:00",
                "updatedAt": "2024-01-01T00:00:00+00:00",
                "replies": []
            }
        }"#;
        let post: PostView = serde_json::from_str(raw).expect("parse post");
        assert_eq!(post.poster_name, "Bob");
        assert_eq!(post.reply_to_id.as_deref(), Some("a1"));
        assert_eq!(
            post.reply_to.as_ref().map(|p| p.poster_name.as_str()),
            Some("Alice")
        );
        assert!(post.replies.is_empty());
    }

    #[test]
    fn create_input_omits_absent_reply_target() {
        let input = CreatePostInput {
            poster_name: "Alice".into(),
            content: "Hello".into(),
            reply_to_id: None,
        };
        let raw = serde_json::to_string(&input).expect("serialize input");
        assert_eq!(raw, r#"{"posterName":"Alice","content":"Hello"}"#);
    }
}
