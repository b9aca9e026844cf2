// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the placement-mode toggle.

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    StartPlacing,
    CancelPlacing,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, is_pointing: bool, hotspot_count: usize) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if is_pointing {
            if ui.button("✖ Cancel").clicked() {
                action = ToolbarAction::CancelPlacing;
            }
        } else if ui.button("⊕ Place hotspot").clicked() {
            action = ToolbarAction::StartPlacing;
        }

        ui.separator();

        let hint_text = if is_pointing {
            "Click on the image to place the hotspot, Escape to cancel"
        } else {
            "Click a marker to select it and edit its text"
        };
        ui.label(egui::RichText::new(hint_text).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{} hotspots", hotspot_count));
        });
    });

    action
}
