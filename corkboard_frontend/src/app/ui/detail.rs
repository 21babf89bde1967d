use eframe::egui::{self, Color32, RichText};

use super::super::state::DetailState;
use super::super::{format_timestamp, CorkboardApp};

pub enum DetailAction {
    None,
    GoBack,
    OpenPost(String),
}

impl CorkboardApp {
    pub(crate) fn render_detail(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut DetailState,
    ) -> DetailAction {
        let mut action = DetailAction::None;

        ui.horizontal(|ui| {
            if ui.button("← Back to posts").clicked() {
                action = DetailAction::GoBack;
            }
            ui.separator();
            ui.label(RichText::new("Post Details").heading());
        });

        if state.is_loading {
            ui.add(egui::Spinner::new());
            return action;
        }

        let Some(post) = state.post.clone() else {
            // load failures route back to the list before this renders
            ui.label("Post not found");
            return action;
        };

        egui::ScrollArea::vertical().id_salt("post-detail").show(ui, |ui| {
            if let Some(parent) = post.reply_to.as_deref() {
                ui.label(RichText::new("In reply to:").small());
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&parent.poster_name).strong());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(format_timestamp(&parent.created_at));
                            },
                        );
                    });
                    ui.label(&parent.content);
                    if ui.button("View original post").clicked() {
                        action = DetailAction::OpenPost(parent.id.clone());
                    }
                });
                ui.add_space(8.0);
            }

            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(egui::vec2(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&post.poster_name).strong());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(format_timestamp(&post.created_at));
                            },
                        );
                    });
                    ui.label(&post.content);
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("ID: {}", post.id)).monospace().size(10.0));
                    ui.label(
                        RichText::new(format!(
                            "Updated: {}",
                            format_timestamp(&post.updated_at)
                        ))
                        .small(),
                    );
                });

            ui.horizontal(|ui| {
                let edit_label = if state.edit_open { "Close editor" } else { "Edit" };
                if ui.button(edit_label).clicked() {
                    state.edit_open = !state.edit_open;
                    if state.edit_open {
                        state.edit_name = post.poster_name.clone();
                        state.edit_content = post.content.clone();
                        state.edit_error = None;
                    }
                }
                if ui.button("Delete post").clicked() {
                    self.confirm_delete = Some(post.id.clone());
                }
            });

            if state.edit_open {
                self.render_edit_form(ui, state);
            }

            ui.separator();
            if post.replies.is_empty() {
                ui.label("No replies yet.");
            } else {
                ui.label(RichText::new(format!("Replies ({})", post.replies.len())).heading());
                for reply in &post.replies {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&reply.poster_name).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(format_timestamp(&reply.created_at));
                                },
                            );
                        });
                        ui.label(&reply.content);
                        if ui.button("View reply").clicked() {
                            action = DetailAction::OpenPost(reply.id.clone());
                        }
                    });
                }
            }

            ui.separator();
            self.render_reply_form(ui, state);
        });

        action
    }

    fn render_edit_form(&mut self, ui: &mut egui::Ui, state: &mut DetailState) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label("Your Name");
            ui.text_edit_singleline(&mut state.edit_name);
            ui.label("Content");
            ui.text_edit_multiline(&mut state.edit_content);
            if let Some(err) = &state.edit_error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }
            let label = if state.edit_saving {
                "Saving…"
            } else {
                "Save changes"
            };
            if ui
                .add_enabled(!state.edit_saving, egui::Button::new(label))
                .clicked()
            {
                self.spawn_update_post(state);
            }
        });
    }

    fn render_reply_form(&mut self, ui: &mut egui::Ui, state: &mut DetailState) {
        ui.label(RichText::new("Reply").heading());
        ui.label("Your Name");
        ui.text_edit_singleline(&mut state.reply_name);
        ui.label("Content");
        ui.text_edit_multiline(&mut state.reply_body);
        if let Some(err) = &state.reply_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        let label = if state.reply_sending {
            "Posting…"
        } else {
            "Post reply"
        };
        if ui
            .add_enabled(!state.reply_sending, egui::Button::new(label))
            .clicked()
        {
            self.spawn_create_reply(state);
        }
    }
}
