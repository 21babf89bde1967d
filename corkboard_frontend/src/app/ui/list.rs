use eframe::egui::{self, Color32, RichText};

use super::super::{format_timestamp, CorkboardApp};
use crate::models::PostView;

impl CorkboardApp {
    pub(crate) fn render_list(&mut self, ui: &mut egui::Ui) {
        if self.posts_loading && self.posts.is_empty() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &self.posts_error {
            ui.colored_label(Color32::LIGHT_RED, err);
            if ui.button("Retry").clicked() {
                self.spawn_load_posts();
            }
            ui.separator();
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.posts.is_empty() && !self.posts_loading {
                ui.label("No posts yet. Create one to get started.");
            }

            let mut post_to_open: Option<String> = None;
            let mut post_to_delete: Option<String> = None;

            // The server already keeps replies out of this listing; drop any
            // that slip through rather than rendering them top-level.
            for post in self.posts.iter().filter(|post| post.reply_to_id.is_none()) {
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
                                    ui.label(RichText::new(&post.id).monospace().size(10.0));
                                },
                            );
                        });
                        if ui.link(&post.content).clicked() {
                            post_to_open = Some(post.id.clone());
                        }
                        ui.horizontal(|ui| {
                            if ui.button("View").clicked() {
                                post_to_open = Some(post.id.clone());
                            }
                            if ui.button("Delete").clicked() {
                                post_to_delete = Some(post.id.clone());
                            }
                        });
                        if !post.replies.is_empty() {
                            ui.separator();
                            ui.label(
                                RichText::new(format!("Replies ({})", post.replies.len())).small(),
                            );
                            ui.indent(&post.id, |ui| {
                                for reply in &post.replies {
                                    render_reply_summary(ui, reply, &mut post_to_open);
                                }
                            });
                        }
                    });
            }

            if let Some(post_id) = post_to_open {
                self.open_detail(&post_id);
            }
            if let Some(post_id) = post_to_delete {
                self.confirm_delete = Some(post_id);
            }
        });
    }
}

fn render_reply_summary(ui: &mut egui::Ui, reply: &PostView, post_to_open: &mut Option<String>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&reply.poster_name).strong().small());
        ui.label(RichText::new(format_timestamp(&reply.created_at)).small());
    });
    if ui.link(RichText::new(&reply.content).small()).clicked() {
        *post_to_open = Some(reply.id.clone());
    }
}
