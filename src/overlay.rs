//! Painting [`Overlay`] shapes and the small UI with egui.
//!
//! Scene coordinates are physical pixels; egui works in points. Every helper
//! here takes `pixels_per_point` and converts on the way in.

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::emath::Rot2;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, TextureId};

use crate::album::Album;
use crate::frame::Overlay;
use crate::palette;

/// Ratio of the inner to the outer star radius.
const STAR_INNER: f32 = 0.4;

/// Numbers shown by the F3 readout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub particles: usize,
    pub frames: usize,
    pub photos_ready: usize,
    pub photos: usize,
    pub uptime: Duration,
}

pub fn color(hex: u32) -> Color32 {
    let [r, g, b] = palette::rgb8(hex);
    Color32::from_rgb(r, g, b)
}

/// Paint every overlay of a frame, in order.
pub fn paint(painter: &egui::Painter, overlays: &[Overlay], album: &Album, pixels_per_point: f32) {
    let to_point = |v: glam::Vec2| pos2(v.x / pixels_per_point, v.y / pixels_per_point);

    for overlay in overlays {
        match overlay {
            Overlay::Star { center, radius, color: hex } => {
                let mesh = star_mesh(to_point(*center), radius / pixels_per_point, color(*hex));
                painter.add(mesh);
            }

            Overlay::Text {
                text,
                anchor,
                size,
                color: hex,
            } => {
                painter.text(
                    to_point(*anchor),
                    Align2::CENTER_BOTTOM,
                    text,
                    FontId::proportional(size / pixels_per_point),
                    color(*hex),
                );
            }

            Overlay::Photo {
                photo,
                center,
                size,
                angle,
                border,
                frame_color,
            } => {
                let center = to_point(*center);
                let side = size / pixels_per_point;
                let border = border / pixels_per_point;

                painter.add(square_mesh(
                    TextureId::default(),
                    center,
                    side + border * 2.0,
                    *angle,
                    color(*frame_color),
                    false,
                ));
                if let Some(texture) = album.texture(*photo) {
                    painter.add(square_mesh(texture.id(), center, side, *angle, Color32::WHITE, true));
                }
            }
        }
    }
}

/// Filled five-pointed star, point up.
pub fn star_mesh(center: Pos2, radius: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.vertices.push(Vertex {
        pos: center,
        uv: WHITE_UV,
        color,
    });

    for i in 0..10 {
        let angle = -FRAC_PI_2 + i as f32 * PI / 5.0;
        let r = if i % 2 == 0 { radius } else { radius * STAR_INNER };
        mesh.vertices.push(Vertex {
            pos: center + vec2(angle.cos(), angle.sin()) * r,
            uv: WHITE_UV,
            color,
        });
    }
    for i in 0..10u32 {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % 10);
    }
    mesh
}

/// Square of edge `side` centred on `center`, rotated by `angle` radians.
///
/// With `textured`, the full texture is stretched over the square; otherwise
/// it is a flat colour.
pub fn square_mesh(texture: TextureId, center: Pos2, side: f32, angle: f32, tint: Color32, textured: bool) -> Mesh {
    let rect = Rect::from_center_size(center, vec2(side, side));
    let mut mesh = Mesh::with_texture(texture);
    if textured {
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        mesh.add_rect_with_uv(rect, uv, tint);
    } else {
        mesh.add_colored_rect(rect, tint);
    }
    mesh.rotate(Rot2::from_angle(angle), center);
    mesh
}

/// Centred start prompt shown while idle. Returns `true` when pressed.
pub fn start_prompt(ctx: &egui::Context) -> bool {
    let mut pressed = false;
    egui::Area::new(egui::Id::new("start_prompt"))
        .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
        .show(ctx, |ui| {
            let label = egui::RichText::new("Start").size(28.0).color(color(palette::GOLD));
            let button = egui::Button::new(label)
                .fill(Color32::from_rgb(40, 10, 10))
                .stroke(egui::Stroke::new(2.0, color(palette::GOLD)))
                .min_size(vec2(160.0, 56.0));
            pressed = ui.add(button).clicked();
        });
    pressed
}

/// Corner readout toggled with F3.
/// `m:ss` since launch.
fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn debug_readout(ctx: &egui::Context, stage: &str, stats: &DebugStats) {
    egui::Area::new(egui::Id::new("debug_readout"))
        .anchor(Align2::LEFT_TOP, vec2(8.0, 8.0))
        .interactable(false)
        .show(ctx, |ui| {
            let text = format!(
                "{:.0} fps\nstage: {}\nparticles: {}\nframes: {}\nphotos: {}/{}\nup: {}",
                stats.fps,
                stage,
                stats.particles,
                stats.frames,
                stats.photos_ready,
                stats.photos,
                format_uptime(stats.uptime)
            );
            ui.label(egui::RichText::new(text).monospace().color(Color32::LIGHT_GRAY));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_reads_minutes_and_seconds() {
        assert_eq!(format_uptime(Duration::from_millis(9_900)), "0:09");
        assert_eq!(format_uptime(Duration::from_secs(754)), "12:34");
    }

    #[test]
    fn test_color_unpacks_hex() {
        assert_eq!(color(palette::GOLD), Color32::from_rgb(255, 215, 0));
    }

    #[test]
    fn test_star_points_up() {
        let mesh = star_mesh(pos2(100.0, 100.0), 20.0, Color32::YELLOW);
        assert_eq!(mesh.vertices.len(), 11);
        assert_eq!(mesh.indices.len(), 30);

        let top = mesh.vertices[1].pos;
        assert!((top.x - 100.0).abs() < 1e-4);
        assert!((top.y - 80.0).abs() < 1e-4);

        // Inner vertices sit at 40% of the outer radius
        let inner = mesh.vertices[2].pos - pos2(100.0, 100.0);
        assert!((inner.length() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_square_mesh_rotates_about_center() {
        let center = pos2(50.0, 50.0);
        let mesh = square_mesh(TextureId::default(), center, 20.0, FRAC_PI_2, Color32::WHITE, false);
        assert_eq!(mesh.vertices.len(), 4);

        for vertex in &mesh.vertices {
            let offset = vertex.pos - center;
            assert!((offset.length() - 200.0f32.sqrt()).abs() < 1e-3);
        }
    }
}
