//! Paints core draw commands onto an egui painter.

use armature_core::{DrawCommand, Rgba, Stroke, Vec2};
use egui::{Color32, Painter, Pos2, Rect, Shape};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x0b, 0x0e, 0x11);

const HALO_RINGS: usize = 4;

fn color(rgba: Rgba) -> Color32 {
    let alpha = (rgba.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

fn stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, color(stroke.color))
}

fn pos(origin: Pos2, point: Vec2) -> Pos2 {
    Pos2::new(origin.x + point.x, origin.y + point.y)
}

pub fn paint(painter: &Painter, origin: Pos2, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Clear { size } => {
                let rect = Rect::from_min_size(origin, egui::vec2(size.x, size.y));
                painter.rect_filled(rect, 0.0, BACKGROUND);
            }
            DrawCommand::FillRect { min, size, color: fill } => {
                let rect = Rect::from_min_size(pos(origin, *min), egui::vec2(size.x, size.y));
                painter.rect_filled(rect, 0.0, color(*fill));
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke: outline,
            } => {
                painter.circle(
                    pos(origin, *center),
                    *radius,
                    fill.map_or(Color32::TRANSPARENT, color),
                    outline.map_or(egui::Stroke::NONE, stroke),
                );
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke: outline,
            } => {
                let points = points.iter().map(|point| pos(origin, *point)).collect();
                painter.add(Shape::convex_polygon(
                    points,
                    fill.map_or(Color32::TRANSPARENT, color),
                    outline.map_or(egui::Stroke::NONE, stroke),
                ));
            }
            DrawCommand::Line {
                from,
                to,
                stroke: line,
                round_cap,
            } => {
                let (from, to) = (pos(origin, *from), pos(origin, *to));
                painter.line_segment([from, to], stroke(*line));
                if *round_cap {
                    let cap = color(line.color);
                    painter.circle_filled(from, line.width / 2.0, cap);
                    painter.circle_filled(to, line.width / 2.0, cap);
                }
            }
            DrawCommand::Glow {
                center,
                radius,
                color: core,
                halo,
                blur,
            } => {
                let center = pos(origin, *center);
                // egui has no shadow blur; fake it with fading rings.
                for ring in (1..=HALO_RINGS).rev() {
                    let spread = *blur * ring as f32 / HALO_RINGS as f32;
                    let fade = Rgba {
                        a: halo.a * 0.25 / ring as f32,
                        ..*halo
                    };
                    painter.circle_filled(center, radius + spread, color(fade));
                }
                painter.circle_filled(center, *radius, color(*core));
            }
        }
    }
}
