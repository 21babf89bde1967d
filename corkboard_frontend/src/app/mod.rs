use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context};
use log::error;

use crate::api::ApiClient;
use crate::models::{CreatePostInput, PostView, UpdatePostInput};

mod handlers_posts;
mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{ComposeState, DetailState, ViewState};
use ui::compose::ComposeAction;
use ui::detail::DetailAction;

pub struct CorkboardApp {
    api: ApiClient,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    posts: Vec<PostView>,
    posts_loading: bool,
    posts_error: Option<String>,
    view: ViewState,
    base_url_input: String,
    info_banner: Option<String>,
    confirm_delete: Option<String>,
}

impl CorkboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let default_url = std::env::var("CORKBOARD_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let api = ApiClient::new(default_url.clone()).unwrap_or_else(|err| {
            error!("failed to initialise API client: {err}");
            ApiClient::new("http://127.0.0.1:3000").expect("fallback API client")
        });
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            api,
            tx,
            rx,
            posts: Vec::new(),
            posts_loading: false,
            posts_error: None,
            view: ViewState::List,
            base_url_input: default_url,
            info_banner: None,
            confirm_delete: None,
        };
        app.spawn_load_posts();
        app
    }

    fn spawn_load_posts(&mut self) {
        if self.posts_loading {
            return;
        }
        self.posts_loading = true;
        self.posts_error = None;
        tasks::load_posts(self.api.clone(), self.tx.clone());
    }

    fn spawn_load_post(&mut self, post_id: &str) {
        tasks::load_post(self.api.clone(), self.tx.clone(), post_id.to_string());
    }

    pub(crate) fn open_detail(&mut self, post_id: &str) {
        self.view = ViewState::Detail(DetailState::loading(post_id));
        self.spawn_load_post(post_id);
    }

    pub(crate) fn open_compose(&mut self) {
        self.view = ViewState::Compose(ComposeState::default());
    }

    // Every navigation back to the list re-fetches; nothing is cached.
    pub(crate) fn go_to_list(&mut self) {
        self.view = ViewState::List;
        self.spawn_load_posts();
    }

    fn spawn_submit_compose(&mut self) {
        let ViewState::Compose(state) = &mut self.view else {
            return;
        };
        let poster_name = state.poster_name.trim().to_string();
        let content = state.content.trim().to_string();
        if poster_name.is_empty() || content.is_empty() {
            state.error = Some("Name and content are both required".into());
            return;
        }
        state.submitting = true;
        state.error = None;
        tasks::create_post(
            self.api.clone(),
            self.tx.clone(),
            CreatePostInput {
                poster_name,
                content,
                reply_to_id: None,
            },
        );
    }

    fn spawn_create_reply(&mut self, state: &mut DetailState) {
        let poster_name = state.reply_name.trim().to_string();
        let content = state.reply_body.trim().to_string();
        if poster_name.is_empty() || content.is_empty() {
            state.reply_error = Some("Name and content are both required".into());
            return;
        }
        state.reply_sending = true;
        state.reply_error = None;
        tasks::create_reply(
            self.api.clone(),
            self.tx.clone(),
            state.post_id.clone(),
            CreatePostInput {
                poster_name,
                content,
                reply_to_id: Some(state.post_id.clone()),
            },
        );
    }

    fn spawn_update_post(&mut self, state: &mut DetailState) {
        let poster_name = state.edit_name.trim().to_string();
        let content = state.edit_content.trim().to_string();
        if poster_name.is_empty() || content.is_empty() {
            state.edit_error = Some("Name and content are both required".into());
            return;
        }
        state.edit_saving = true;
        state.edit_error = None;
        tasks::update_post(
            self.api.clone(),
            self.tx.clone(),
            state.post_id.clone(),
            UpdatePostInput {
                poster_name: Some(poster_name),
                content: Some(content),
                reply_to_id: None,
            },
        );
    }

    fn spawn_delete_post(&mut self, post_id: &str) {
        tasks::delete_post(self.api.clone(), self.tx.clone(), post_id.to_string());
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn render_confirm_delete(&mut self, ctx: &egui::Context) {
        let Some(post_id) = self.confirm_delete.clone() else {
            return;
        };
        let mut open = true;
        let mut decided = false;
        egui::Window::new("Delete post?")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Really delete this post? Its replies are left in place.");
                ui.label(egui::RichText::new(&post_id).monospace().size(10.0));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.spawn_delete_post(&post_id);
                        decided = true;
                    }
                    if ui.button("Cancel").clicked() {
                        decided = true;
                    }
                });
            });
        if decided || !open {
            self.confirm_delete = None;
        }
    }
}

impl eframe::App for CorkboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("API Base URL");
                ui.text_edit_singleline(&mut self.base_url_input);
                if ui.button("Apply").clicked() {
                    match self.api.set_base_url(self.base_url_input.clone()) {
                        Ok(()) => {
                            self.info_banner = Some("API URL updated".into());
                            self.go_to_list();
                        }
                        Err(err) => {
                            self.info_banner = Some(format!("Failed to update URL: {err}"));
                        }
                    }
                }
                if ui.button("Refresh").clicked() {
                    self.spawn_load_posts();
                }
                if ui.button("New Post").clicked() {
                    self.open_compose();
                }
            });

            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
        });

        match &self.view {
            ViewState::List => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    self.render_list(ui);
                });
            }
            ViewState::Detail(_) => {
                // Detach the view state so render methods can borrow the app
                // mutably alongside it.
                let mut temp = if let ViewState::Detail(state) = &mut self.view {
                    std::mem::take(state)
                } else {
                    unreachable!()
                };

                let mut action = DetailAction::None;
                egui::CentralPanel::default().show(ctx, |ui| {
                    action = self.render_detail(ui, &mut temp);
                });

                if let ViewState::Detail(state) = &mut self.view {
                    *state = temp;
                }

                match action {
                    DetailAction::GoBack => self.go_to_list(),
                    DetailAction::OpenPost(post_id) => self.open_detail(&post_id),
                    DetailAction::None => {}
                }
            }
            ViewState::Compose(_) => {
                let mut temp = if let ViewState::Compose(state) = &mut self.view {
                    std::mem::take(state)
                } else {
                    unreachable!()
                };

                let mut action = ComposeAction::None;
                egui::CentralPanel::default().show(ctx, |ui| {
                    action = self.render_compose(ui, &mut temp);
                });

                if let ViewState::Compose(state) = &mut self.view {
                    *state = temp;
                }

                match action {
                    ComposeAction::Submit => self.spawn_submit_compose(),
                    ComposeAction::Cancel => self.go_to_list(),
                    ComposeAction::None => {}
                }
            }
        }

        self.render_confirm_delete(ctx);
    }
}

fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::format_timestamp;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamps_render_as_utc_minutes() {
        assert_eq!(
            format_timestamp("2024-05-01T12:30:45+00:00"),
            "2024-05-01 12:30 UTC"
        );
        assert_eq!(
            format_timestamp("2024-05-01T12:30:45+02:00"),
            "2024-05-01 10:30 UTC"
        );
    }

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(format_timestamp("not-a-timestamp"), "not-a-timestamp");
    }
}
