use crate::models::PostView;

use super::CorkboardApp;

pub enum AppMessage {
    PostsLoaded(Result<Vec<PostView>, anyhow::Error>),
    PostLoaded {
        post_id: String,
        result: Result<PostView, anyhow::Error>,
    },
    PostCreated(Result<PostView, anyhow::Error>),
    ReplyCreated {
        parent_id: String,
        result: Result<PostView, anyhow::Error>,
    },
    PostUpdated {
        post_id: String,
        result: Result<PostView, anyhow::Error>,
    },
    PostDeleted {
        post_id: String,
        result: Result<(), anyhow::Error>,
    },
}

pub fn process_messages(app: &mut CorkboardApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::PostsLoaded(result) => app.handle_posts_loaded(result),
            AppMessage::PostLoaded { post_id, result } => app.handle_post_loaded(post_id, result),
            AppMessage::PostCreated(result) => app.handle_post_created(result),
            AppMessage::ReplyCreated { parent_id, result } => {
                app.handle_reply_created(parent_id, result)
            }
            AppMessage::PostUpdated { post_id, result } => app.handle_post_updated(post_id, result),
            AppMessage::PostDeleted { post_id, result } => app.handle_post_deleted(post_id, result),
        }
    }
}
