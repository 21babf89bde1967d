use crate::models::PostView;

use super::state::ViewState;
use super::CorkboardApp;

impl CorkboardApp {
    pub(super) fn handle_posts_loaded(&mut self, result: Result<Vec<PostView>, anyhow::Error>) {
        self.posts_loading = false;
        match result {
            Ok(posts) => {
                self.posts = posts;
            }
            Err(err) => {
                self.posts_error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_post_loaded(
        &mut self,
        post_id: String,
        result: Result<PostView, anyhow::Error>,
    ) {
        let mut back_to_list = false;
        if let ViewState::Detail(state) = &mut self.view {
            // Responses for a post we already navigated away from are dropped.
            if state.post_id == post_id {
                state.is_loading = false;
                match result {
                    Ok(post) => {
                        if !state.edit_open {
                            state.edit_name = post.poster_name.clone();
                            state.edit_content = post.content.clone();
                        }
                        state.post = Some(post);
                    }
                    Err(err) => {
                        log::warn!("failed to load post {post_id}: {err}");
                        back_to_list = true;
                    }
                }
            }
        }
        if back_to_list {
            self.go_to_list();
        }
    }

    pub(super) fn handle_post_created(&mut self, result: Result<PostView, anyhow::Error>) {
        let ViewState::Compose(state) = &mut self.view else {
            return;
        };
        state.submitting = false;
        match result {
            Ok(_) => {
                self.info_banner = Some("Post created".into());
                self.go_to_list();
            }
            Err(err) => {
                state.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_reply_created(
        &mut self,
        parent_id: String,
        result: Result<PostView, anyhow::Error>,
    ) {
        let ViewState::Detail(state) = &mut self.view else {
            return;
        };
        if state.post_id != parent_id {
            return;
        }
        state.reply_sending = false;
        match result {
            Ok(_) => {
                state.reply_name.clear();
                state.reply_body.clear();
                state.reply_error = None;
                state.is_loading = true;
                let post_id = state.post_id.clone();
                self.info_banner = Some("Reply posted".into());
                self.spawn_load_post(&post_id);
            }
            Err(err) => {
                state.reply_error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_post_updated(
        &mut self,
        post_id: String,
        result: Result<PostView, anyhow::Error>,
    ) {
        let ViewState::Detail(state) = &mut self.view else {
            return;
        };
        if state.post_id != post_id {
            return;
        }
        state.edit_saving = false;
        match result {
            Ok(post) => {
                state.edit_open = false;
                state.edit_error = None;
                state.edit_name = post.poster_name.clone();
                state.edit_content = post.content.clone();
                state.post = Some(post);
                self.info_banner = Some("Post updated".into());
            }
            Err(err) => {
                state.edit_error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_post_deleted(
        &mut self,
        post_id: String,
        result: Result<(), anyhow::Error>,
    ) {
        let in_detail =
            matches!(&self.view, ViewState::Detail(state) if state.post_id == post_id);
        match result {
            Ok(()) => {
                self.info_banner = Some("Post deleted".into());
                if in_detail {
                    self.go_to_list();
                } else {
                    // local removal only after the server confirmed the delete
                    self.posts.retain(|post| post.id != post_id);
                }
            }
            Err(err) => {
                self.info_banner = Some(format!("Failed to delete post: {err}"));
            }
        }
    }
}
