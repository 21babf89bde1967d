use crate::models::PostView;

pub enum ViewState {
    List,
    Detail(DetailState),
    Compose(ComposeState),
}

#[derive(Default)]
pub struct DetailState {
    pub post_id: String,
    pub post: Option<PostView>,
    pub is_loading: bool,
    pub reply_name: String,
    pub reply_body: String,
    pub reply_sending: bool,
    pub reply_error: Option<String>,
    pub edit_open: bool,
    pub edit_name: String,
    pub edit_content: String,
    pub edit_saving: bool,
    pub edit_error: Option<String>,
}

impl DetailState {
    pub fn loading(post_id: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            is_loading: true,
            ..Default::default()
        }
    }
}

#[derive(Default)]
pub struct ComposeState {
    pub poster_name: String,
    pub content: String,
    pub submitting: bool,
    pub error: Option<String>,
}
