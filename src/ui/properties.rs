// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot properties panel.
//!
//! This module lists the placed hotspots and lets the user edit the
//! selected one's title and description or delete it.

use hotspots::models::Hotspot;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectHotspot(String),
    EditHotspot(Hotspot),
    DeleteHotspot(String),
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, hotspots: &[Hotspot], selected: Option<&str>) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Hotspots");
    ui.separator();

    if hotspots.is_empty() {
        ui.label(egui::RichText::new("No hotspots yet").weak());
        return action;
    }

    egui::ScrollArea::vertical()
        .id_source("hotspot_list")
        .max_height(ui.available_height() * 0.5)
        .show(ui, |ui| {
            for (index, hotspot) in hotspots.iter().enumerate() {
                let label = if hotspot.title.is_empty() {
                    format!("{}. (untitled)", index + 1)
                } else {
                    format!("{}. {}", index + 1, hotspot.title)
                };
                let is_selected = selected == Some(hotspot.id());
                if ui.selectable_label(is_selected, label).clicked() {
                    action = PropertiesAction::SelectHotspot(hotspot.id().to_string());
                }
            }
        });

    let Some(hotspot) = selected.and_then(|id| hotspots.iter().find(|h| h.id() == id)) else {
        return action;
    };

    ui.separator();
    ui.label(
        egui::RichText::new(format!(
            "Position: ({:.1}, {:.1})",
            hotspot.position.left, hotspot.position.top
        ))
        .weak(),
    );

    let mut draft = hotspot.clone();
    ui.label("Title");
    let title_changed = ui.text_edit_singleline(&mut draft.title).changed();
    ui.label("Description");
    let description_changed = ui.text_edit_multiline(&mut draft.description).changed();
    if title_changed || description_changed {
        action = PropertiesAction::EditHotspot(draft);
    }

    ui.add_space(8.0);
    if ui.button("🗑 Delete").clicked() {
        action = PropertiesAction::DeleteHotspot(hotspot.id().to_string());
    }

    action
}
