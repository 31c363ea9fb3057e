//! Host input normalised into arm events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::InputConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove(Vec2),
    PointerDown,
    PointerUp,
    /// Device orientation in degrees: `beta` front/back, `gamma` left/right.
    Tilt { beta: f32, gamma: f32 },
}

/// Maps a device tilt onto canvas coordinates, clamping to the configured range.
pub fn tilt_to_point(config: &InputConfig, beta: f32, gamma: f32, size: Vec2) -> Vec2 {
    let range = config.tilt_range;
    let unit = |degrees: f32| (degrees.clamp(-range, range) + range) / (2.0 * range);
    Vec2::new(
        unit(gamma) * size.x,
        unit(beta - config.neutral_beta) * size.y,
    )
}

/// Cursor readout: whole pixels, zero-padded to four digits.
pub fn format_coordinate(value: f32) -> String {
    let pixels = if value.is_finite() { value.max(0.0) } else { 0.0 };
    format!("{:04}", pixels as u32)
}
