// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the surface image and hotspot markers.
//!
//! This module draws the surface, the placed hotspots and the placement
//! preview, and reports pointer activity in surface coordinates.

use hotspots::models::{Hotspot, Position};
use hotspots::util::geometry::{self, SurfaceView};

const MARKER_RADIUS: f32 = 7.0;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Pointer hovering over the surface
    PointerMove(Position),
    /// Click on the surface (not on a marker, unless placing)
    Click(Position),
    SelectHotspot(String),
}

/// Everything the canvas needs to draw one frame.
pub struct CanvasView<'a> {
    pub image_texture: &'a Option<egui::TextureHandle>,
    pub image_size: Option<(u32, u32)>,
    pub hotspots: &'a [Hotspot],
    pub selected: Option<&'a str>,
    pub is_pointing: bool,
    pub primed: Option<Position>,
}

/// Display the main canvas area and handle mouse interactions.
pub fn show(ui: &mut egui::Ui, view: CanvasView<'_>) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);
        let available = ui.available_size();

        let (surface_rect, surface_view) = match view.image_size {
            Some((img_width, img_height)) if view.image_texture.is_some() => {
                // Fit the image inside the panel, preserving aspect ratio
                let img_aspect = img_width as f32 / img_height as f32;
                let available_aspect = available.x / available.y;
                let (display_width, display_height) = if img_aspect > available_aspect {
                    (available.x, available.x / img_aspect)
                } else {
                    (available.y * img_aspect, available.y)
                };
                let x_offset = (available.x - display_width) / 2.0;
                let y_offset = (available.y - display_height) / 2.0;
                let rect = egui::Rect::from_min_size(
                    ui.min_rect().min + egui::vec2(x_offset, y_offset),
                    egui::vec2(display_width, display_height),
                );
                let surface_view = SurfaceView {
                    origin: (rect.min.x as f64, rect.min.y as f64),
                    display_size: (display_width as f64, display_height as f64),
                    surface_size: (img_width as f64, img_height as f64),
                };
                (rect, surface_view)
            }
            _ => {
                let rect = egui::Rect::from_min_size(ui.min_rect().min, available);
                let surface_view = SurfaceView::unscaled(
                    (rect.min.x as f64, rect.min.y as f64),
                    (rect.width() as f64, rect.height() as f64),
                );
                (rect, surface_view)
            }
        };

        if let Some(texture) = view.image_texture {
            ui.painter().image(
                texture.id(),
                surface_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else {
            ui.painter().text(
                surface_rect.center(),
                egui::Align2::CENTER_CENTER,
                "File → Open Image... to choose a surface",
                egui::FontId::proportional(14.0),
                egui::Color32::from_gray(130),
            );
        }

        let mut response = ui.allocate_rect(surface_rect, egui::Sense::click());
        if view.is_pointing {
            response = response.on_hover_cursor(egui::CursorIcon::Crosshair);
        }

        let to_screen = |position: &Position| {
            let (x, y) = geometry::to_view(position, &surface_view);
            egui::pos2(x as f32, y as f32)
        };

        if let Some(pos) = response.hover_pos() {
            if let Some(position) = geometry::to_surface(pos.x as f64, pos.y as f64, &surface_view) {
                action = CanvasAction::PointerMove(position);
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let hit = if view.is_pointing {
                    None
                } else {
                    view.hotspots
                        .iter()
                        .find(|h| to_screen(&h.position).distance(pos) <= MARKER_RADIUS + 2.0)
                };
                action = match hit {
                    Some(hotspot) => CanvasAction::SelectHotspot(hotspot.id().to_string()),
                    None => geometry::to_surface(pos.x as f64, pos.y as f64, &surface_view)
                        .map(CanvasAction::Click)
                        .unwrap_or(CanvasAction::None),
                };
            }
        }

        let painter = ui.painter();
        for (index, hotspot) in view.hotspots.iter().enumerate() {
            let selected = view.selected == Some(hotspot.id());
            draw_marker(painter, to_screen(&hotspot.position), index + 1, &hotspot.title, selected);
        }

        if view.is_pointing {
            if let Some(primed) = view.primed {
                let center = to_screen(&primed);
                painter.circle_stroke(
                    center,
                    MARKER_RADIUS,
                    egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
                );
            }
        }
    });

    action
}

/// Draw a numbered hotspot marker with its title beneath.
fn draw_marker(painter: &egui::Painter, center: egui::Pos2, number: usize, title: &str, selected: bool) {
    let fill = if selected {
        egui::Color32::from_rgb(255, 140, 0)
    } else {
        egui::Color32::YELLOW
    };

    painter.circle_filled(center, MARKER_RADIUS, fill);
    painter.circle_stroke(center, MARKER_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLACK));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        number.to_string(),
        egui::FontId::proportional(10.0),
        egui::Color32::BLACK,
    );

    if !title.is_empty() {
        painter.text(
            center + egui::vec2(0.0, MARKER_RADIUS + 2.0),
            egui::Align2::CENTER_TOP,
            title,
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }
}
