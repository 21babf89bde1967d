use crate::database::models::PostRecord;
use crate::database::repositories::{PostRepository, SqliteRepositories};
use crate::database::Database;
use crate::utils::now_utc_iso;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_POSTER_NAME_CHARS: usize = 100;

/// Reply depth populated on listings and single-post reads: replies of
/// replies are included, nothing deeper. The dedicated replies listing
/// populates one level instead.
const NESTED_REPLY_DEPTH: usize = 2;

#[derive(Debug, Error)]
pub enum PostingError {
    #[error("post {0} not found")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type PostingResult<T> = std::result::Result<T, PostingError>;

#[derive(Clone)]
pub struct PostService {
    database: Database,
}

impl PostService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// All top-level posts, newest first, each with two levels of replies.
    pub fn list_posts(&self) -> PostingResult<Vec<PostView>> {
        let views = self.database.with_repositories(|repos| {
            let posts = repos.posts().list_top_level()?;
            posts
                .into_iter()
                .map(|record| view_with_replies(&repos, record, NESTED_REPLY_DEPTH))
                .collect()
        })?;
        Ok(views)
    }

    pub fn get_post(&self, id: &str) -> PostingResult<PostView> {
        self.database
            .with_repositories(|repos| {
                let Some(record) = repos.posts().get(id)? else {
                    return Ok(None);
                };
                let mut view = view_with_replies(&repos, record, NESTED_REPLY_DEPTH)?;
                attach_parent(&repos, &mut view)?;
                Ok(Some(view))
            })?
            .ok_or_else(|| PostingError::NotFound(id.to_string()))
    }

    /// Direct replies of a post, newest first, each with one level of its own
    /// replies.
    pub fn list_replies(&self, id: &str) -> PostingResult<Vec<PostView>> {
        self.database
            .with_repositories(|repos| {
                if repos.posts().get(id)?.is_none() {
                    return Ok(None);
                }
                let replies = repos.posts().list_replies_of(id)?;
                let views = replies
                    .into_iter()
                    .map(|record| view_with_replies(&repos, record, 1))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(views))
            })?
            .ok_or_else(|| PostingError::NotFound(id.to_string()))
    }

    pub fn create_post(&self, input: CreatePostInput) -> PostingResult<PostView> {
        validate_poster_name(&input.poster_name)?;
        validate_content(&input.content)?;

        if let Some(parent_id) = input.reply_to_id.as_deref() {
            let parent = self
                .database
                .with_repositories(|repos| repos.posts().get(parent_id))?;
            if parent.is_none() {
                return Err(PostingError::NotFound(parent_id.to_string()));
            }
        }

        let now = now_utc_iso();
        let record = PostRecord {
            id: Uuid::new_v4().to_string(),
            poster_name: input.poster_name,
            content: input.content,
            reply_to_id: input.reply_to_id,
            created_at: now.clone(),
            updated_at: now,
        };

        // The parent check and the insert are separate store calls; a
        // concurrent delete of the parent in between is not guarded against.
        self.database
            .with_repositories(|repos| repos.posts().create(&record))?;

        let view = self.database.with_repositories(|repos| {
            let mut view = PostView::from_record(record, Vec::new());
            attach_parent(&repos, &mut view)?;
            Ok(view)
        })?;
        Ok(view)
    }

    pub fn update_post(&self, id: &str, input: UpdatePostInput) -> PostingResult<PostView> {
        if let Some(poster_name) = &input.poster_name {
            validate_poster_name(poster_name)?;
        }
        if let Some(content) = &input.content {
            validate_content(content)?;
        }

        let mut record = self
            .database
            .with_repositories(|repos| repos.posts().get(id))?
            .ok_or_else(|| PostingError::NotFound(id.to_string()))?;

        if let Some(parent_id) = input.reply_to_id.as_deref() {
            let parent = self
                .database
                .with_repositories(|repos| repos.posts().get(parent_id))?;
            if parent.is_none() {
                return Err(PostingError::NotFound(parent_id.to_string()));
            }
        }

        if let Some(poster_name) = input.poster_name {
            record.poster_name = poster_name;
        }
        if let Some(content) = input.content {
            record.content = content;
        }
        if let Some(reply_to_id) = input.reply_to_id {
            record.reply_to_id = Some(reply_to_id);
        }
        record.updated_at = now_utc_iso();

        self.database
            .with_repositories(|repos| repos.posts().update(&record))?;

        self.get_post(&record.id)
    }

    pub fn delete_post(&self, id: &str) -> PostingResult<()> {
        let existing = self
            .database
            .with_repositories(|repos| repos.posts().get(id))?;
        if existing.is_none() {
            return Err(PostingError::NotFound(id.to_string()));
        }
        // No cascade: replies keep their reply_to_id pointing at the removed
        // post and simply stop resolving a parent.
        self.database
            .with_repositories(|repos| repos.posts().delete(id))?;
        Ok(())
    }
}

fn validate_poster_name(poster_name: &str) -> PostingResult<()> {
    if poster_name.trim().is_empty() {
        return Err(PostingError::InvalidInput(
            "posterName may not be empty".into(),
        ));
    }
    if poster_name.chars().count() > MAX_POSTER_NAME_CHARS {
        return Err(PostingError::InvalidInput(format!(
            "posterName may not exceed {MAX_POSTER_NAME_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> PostingResult<()> {
    if content.trim().is_empty() {
        return Err(PostingError::InvalidInput("content may not be empty".into()));
    }
    Ok(())
}

fn view_with_replies(
    repos: &SqliteRepositories<'_>,
    record: PostRecord,
    depth: usize,
) -> Result<PostView> {
    let replies = if depth == 0 {
        Vec::new()
    } else {
        repos
            .posts()
            .list_replies_of(&record.id)?
            .into_iter()
            .map(|reply| view_with_replies(repos, reply, depth - 1))
            .collect::<Result<Vec<_>>>()?
    };
    Ok(PostView::from_record(record, replies))
}

/// Resolves the referenced parent as a bare view. A dangling reference (the
/// parent was deleted after the reply was created) stays unresolved and
/// `reply_to` remains absent.
fn attach_parent(repos: &SqliteRepositories<'_>, view: &mut PostView) -> Result<()> {
    if let Some(parent_id) = view.reply_to_id.as_deref() {
        if let Some(parent) = repos.posts().get(parent_id)? {
            view.reply_to = Some(Box::new(PostView::from_record(parent, Vec::new())));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub poster_name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub replies: Vec<PostView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Box<PostView>>,
}

impl PostView {
    fn from_record(record: PostRecord, replies: Vec<PostView>) -> Self {
        Self {
            id: record.id,
            poster_name: record.poster_name,
            content: record.content,
            reply_to_id: record.reply_to_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            replies,
            reply_to: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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
    use crate::database::Database;
    use rusqlite::Connection;

    fn setup_service() -> PostService {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let db = Database::from_connection(conn, true);
        db.ensure_migrations().expect("migrations");
        PostService::new(db)
    }

    fn create(
        service: &PostService,
        poster_name: &str,
        content: &str,
        reply_to: Option<&str>,
    ) -> PostView {
        service
            .create_post(CreatePostInput {
                poster_name: poster_name.into(),
                content: content.into(),
                reply_to_id: reply_to.map(str::to_string),
            })
            .expect("create post")
    }

    #[test]
    fn created_post_is_immediately_readable() {
        let service = setup_service();
        let post = create(&service, "Alice", "Hello", None);

        let fetched = service.get_post(&post.id).expect("get post");
        assert_eq!(fetched.poster_name, "Alice");
        assert_eq!(fetched.content, "Hello");
        assert!(fetched.reply_to_id.is_none());
        assert!(fetched.replies.is_empty());
        assert!(fetched.reply_to.is_none());
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn reply_to_missing_parent_creates_nothing() {
        let service = setup_service();
        let err = service
            .create_post(CreatePostInput {
                poster_name: "Bob".into(),
                content: "orphan".into(),
                reply_to_id: Some("missing-parent".into()),
            })
            .expect_err("parent existence check");

        assert!(matches!(err, PostingError::NotFound(_)));
        assert!(err.to_string().contains("missing-parent"));
        assert!(service.list_posts().expect("list posts").is_empty());
    }

    #[test]
    fn replies_listing_matches_created_reply() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);
        let b = create(&service, "Bob", "Hi Alice", Some(&a.id));

        let replies = service.list_replies(&a.id).expect("list replies");
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].id, b.id);
        assert_eq!(replies[0].poster_name, "Bob");
    }

    #[test]
    fn replies_of_leaf_post_are_empty() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);
        assert!(service.list_replies(&a.id).expect("list replies").is_empty());
    }

    #[test]
    fn replies_of_unknown_post_is_not_found() {
        let service = setup_service();
        let err = service.list_replies("nope").expect_err("missing parent");
        assert!(matches!(err, PostingError::NotFound(_)));
    }

    #[test]
    fn top_level_listing_excludes_replies() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);
        let b = create(&service, "Bob", "Hi Alice", Some(&a.id));

        let posts = service.list_posts().expect("list posts");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, a.id);
        assert!(posts.iter().all(|post| post.reply_to_id.is_none()));
        assert_eq!(posts[0].replies.len(), 1);
        assert_eq!(posts[0].replies[0].id, b.id);
    }

    #[test]
    fn single_post_read_populates_two_levels_and_parent() {
        let service = setup_service();
        let a = create(&service, "Alice", "root", None);
        let b = create(&service, "Bob", "child", Some(&a.id));
        let c = create(&service, "Carol", "grandchild", Some(&b.id));

        let fetched_a = service.get_post(&a.id).expect("get root");
        assert_eq!(fetched_a.replies.len(), 1);
        assert_eq!(fetched_a.replies[0].id, b.id);
        assert_eq!(fetched_a.replies[0].replies.len(), 1);
        assert_eq!(fetched_a.replies[0].replies[0].id, c.id);
        // two levels only: the grandchild's own replies are never fetched
        assert!(fetched_a.replies[0].replies[0].replies.is_empty());

        let fetched_b = service.get_post(&b.id).expect("get child");
        let parent = fetched_b.reply_to.expect("parent populated");
        assert_eq!(parent.id, a.id);
        assert!(parent.replies.is_empty());
    }

    #[test]
    fn update_patches_only_provided_fields() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);

        let updated = service
            .update_post(
                &a.id,
                UpdatePostInput {
                    content: Some("Hello, edited".into()),
                    ..Default::default()
                },
            )
            .expect("update post");

        assert_eq!(updated.content, "Hello, edited");
        assert_eq!(updated.poster_name, "Alice");
        assert_eq!(updated.created_at, a.created_at);
    }

    #[test]
    fn update_of_unknown_post_is_not_found() {
        let service = setup_service();
        let err = service
            .update_post("nope", UpdatePostInput::default())
            .expect_err("missing target");
        assert!(matches!(err, PostingError::NotFound(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn update_to_missing_parent_is_not_found() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);
        let err = service
            .update_post(
                &a.id,
                UpdatePostInput {
                    reply_to_id: Some("gone".into()),
                    ..Default::default()
                },
            )
            .expect_err("parent existence check");
        assert!(matches!(err, PostingError::NotFound(_)));
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);

        service.delete_post(&a.id).expect("delete post");

        let err = service.get_post(&a.id).expect_err("post removed");
        assert!(matches!(err, PostingError::NotFound(_)));

        let err = service.delete_post(&a.id).expect_err("already removed");
        assert!(err.to_string().contains(&a.id));
    }

    #[test]
    fn deleting_parent_leaves_reply_dangling() {
        let service = setup_service();
        let a = create(&service, "Alice", "Hello", None);
        let b = create(&service, "Bob", "Hi Alice", Some(&a.id));

        service.delete_post(&a.id).expect("delete parent");

        let orphan = service.get_post(&b.id).expect("reply still readable");
        assert_eq!(orphan.reply_to_id.as_deref(), Some(a.id.as_str()));
        assert!(orphan.reply_to.is_none());

        // the orphan stays out of the top-level listing
        assert!(service.list_posts().expect("list posts").is_empty());

        // and its parent no longer answers the replies endpoint
        let err = service.list_replies(&a.id).expect_err("parent gone");
        assert!(matches!(err, PostingError::NotFound(_)));
    }

    #[test]
    fn blank_or_oversized_input_is_rejected() {
        let service = setup_service();

        let err = service
            .create_post(CreatePostInput {
                poster_name: "   ".into(),
                content: "Hello".into(),
                reply_to_id: None,
            })
            .expect_err("blank name");
        assert!(matches!(err, PostingError::InvalidInput(_)));

        let err = service
            .create_post(CreatePostInput {
                poster_name: "Alice".into(),
                content: "".into(),
                reply_to_id: None,
            })
            .expect_err("blank content");
        assert!(matches!(err, PostingError::InvalidInput(_)));

        let err = service
            .create_post(CreatePostInput {
                poster_name: "x".repeat(MAX_POSTER_NAME_CHARS + 1),
                content: "Hello".into(),
                reply_to_id: None,
            })
            .expect_err("oversized name");
        assert!(matches!(err, PostingError::InvalidInput(_)));
    }
}
