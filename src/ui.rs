//! egui adapter for decorated message views.
//!
//! Pure drawing: the host composes this into its message panel. All
//! interception logic lives in `intercept` and `decor`.

use eframe::egui::{self, Color32};

use crate::view::{MessageView, Rgba};

/// Draw one decorated message view.
///
/// Collapsed views allocate no height at all; the record keeps existing,
/// the message just loses its visual space.
pub fn show_message_view(ui: &mut egui::Ui, view: &MessageView) {
    if view.collapsed {
        let _ = ui.allocate_space(egui::vec2(ui.available_width(), 0.0));
        return;
    }

    if let Some(tint) = view.background {
        let rect = ui.available_rect_before_wrap();
        ui.painter().rect_filled(
            egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), 26.0)),
            6.0,
            tint_color(tint),
        );
    }

    ui.label(egui::RichText::new(&view.body).size(14.0));

    for note in &view.notes {
        ui.label(egui::RichText::new(note).size(10.0).color(Color32::GRAY));
    }

    if !view.controls.is_empty() {
        ui.horizontal(|ui| {
            for control in &view.controls {
                if ui.small_button(control.label()).clicked() {
                    control.activate();
                }
            }
        });
    }
}

fn tint_color(tint: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(tint.r, tint.g, tint.b, tint.a)
}
