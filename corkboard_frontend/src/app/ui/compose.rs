use eframe::egui::{self, Color32, RichText};

use super::super::state::ComposeState;
use super::super::CorkboardApp;

pub enum ComposeAction {
    None,
    Cancel,
    Submit,
}

impl CorkboardApp {
    pub(crate) fn render_compose(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut ComposeState,
    ) -> ComposeAction {
        let mut action = ComposeAction::None;

        ui.label(RichText::new("Create New Post").heading());
        ui.add_space(8.0);

        ui.label("Your Name");
        ui.add(egui::TextEdit::singleline(&mut state.poster_name).char_limit(100));

        ui.label("Content");
        ui.add(
            egui::TextEdit::multiline(&mut state.content)
                .desired_rows(5)
                .desired_width(f32::INFINITY)
                .hint_text("What's on your mind?"),
        );

        if let Some(err) = &state.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }

        ui.horizontal(|ui| {
            let label = if state.submitting {
                "Creating…"
            } else {
                "Create Post"
            };
            if ui
                .add_enabled(!state.submitting, egui::Button::new(label))
                .clicked()
            {
                action = ComposeAction::Submit;
            }
            if ui.button("Cancel").clicked() {
                action = ComposeAction::Cancel;
            }
        });

        action
    }
}
