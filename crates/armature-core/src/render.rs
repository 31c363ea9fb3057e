//! Frame description for the arm: a flat list of draw commands rebuilt every frame.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::sparks::Spark;

/// 8-bit colour with a floating alpha, matching canvas `rgba()` notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

pub mod palette {
    use super::Rgba;

    pub const FIXTURE: Rgba = Rgba::opaque(0x11, 0x11, 0x11);
    pub const STEEL_DARK: Rgba = Rgba::opaque(0x2c, 0x3e, 0x50);
    pub const PLATE: Rgba = Rgba::new(150, 160, 170, 0.9);
    pub const OUTLINE: Rgba = Rgba::opaque(0, 0, 0);
    pub const JOINT: Rgba = Rgba::opaque(0x1a, 0x1f, 0x24);
    pub const CYAN: Rgba = Rgba::opaque(0x00, 0xf3, 0xff);
    pub const NOZZLE: Rgba = Rgba::opaque(0xe0, 0xe6, 0xed);
    pub const GLOW: Rgba = Rgba::new(255, 255, 255, 0.9);
    pub const CROSSHAIR: Rgba = Rgba::new(0, 243, 255, 0.4);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub const fn new(width: f32, color: Rgba) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
    },
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    /// Closed convex outline.
    Polygon {
        points: Vec<Vec2>,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
        round_cap: bool,
    },
    /// Filled disc with a soft halo of `blur` pixels.
    Glow {
        center: Vec2,
        radius: f32,
        color: Rgba,
        halo: Rgba,
        blur: f32,
    },
}

/// Everything the renderer reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub size: Vec2,
    pub chain: &'a Chain,
    pub target: Vec2,
    pub idle: bool,
    /// Glow radius while the tool is working, `None` otherwise.
    pub glow: Option<f32>,
    pub sparks: &'a [Spark],
}

impl Scene<'_> {
    pub fn is_working(&self) -> bool {
        self.glow.is_some()
    }
}

const CROSSHAIR_ARM: f32 = 10.0;

/// Builds the full frame. Pure: the same scene always yields the same commands.
pub fn render(scene: &Scene<'_>) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear { size: scene.size }];
    draw_base(&mut commands, scene.chain.base());
    draw_segments(&mut commands, scene.chain);

    let tip = scene.chain.tip();
    draw_tool(&mut commands, tip, scene.chain.tip_angle());
    if let Some(radius) = scene.glow {
        commands.push(DrawCommand::Glow {
            center: tip,
            radius,
            color: palette::GLOW,
            halo: palette::CYAN,
            blur: 20.0,
        });
    }
    if !scene.idle {
        draw_crosshair(&mut commands, scene.target);
    }

    commands.extend(scene.sparks.iter().map(|spark| DrawCommand::Line {
        from: spark.previous,
        to: spark.position,
        stroke: Stroke::new(spark.stroke_width(), spark.color()),
        round_cap: true,
    }));
    commands
}

fn draw_base(commands: &mut Vec<DrawCommand>, base: Vec2) {
    commands.push(DrawCommand::FillRect {
        min: base - Vec2::new(30.0, 15.0),
        size: Vec2::new(60.0, 30.0),
        color: palette::FIXTURE,
    });
    commands.push(DrawCommand::Circle {
        center: base - Vec2::new(0.0, 15.0),
        radius: 20.0,
        fill: Some(palette::STEEL_DARK),
        stroke: None,
    });
}

fn draw_segments(commands: &mut Vec<DrawCommand>, chain: &Chain) {
    let count = chain.len();
    for (index, segment) in chain.segments().iter().enumerate() {
        let remaining = (count - index) as f32;
        let proximal = remaining * 2.0 + 6.0;
        let distal = (remaining - 1.0) * 2.0 + 6.0;
        let start = segment.position;
        let end = segment.end();
        let left = Vec2::from_angle(segment.angle - FRAC_PI_2);
        let right = Vec2::from_angle(segment.angle + FRAC_PI_2);

        commands.push(DrawCommand::Polygon {
            points: vec![
                start + left * proximal,
                end + left * distal,
                end + right * distal,
                start + right * proximal,
            ],
            fill: Some(palette::PLATE),
            stroke: Some(Stroke::new(1.0, palette::OUTLINE)),
        });
        commands.push(DrawCommand::Circle {
            center: start,
            radius: proximal + 2.0,
            fill: Some(palette::JOINT),
            stroke: Some(Stroke::new(2.0, palette::CYAN)),
        });
    }
}

/// Welding head: a body block and a tapered nozzle, both in the tip's frame.
fn draw_tool(commands: &mut Vec<DrawCommand>, tip: Vec2, angle: f32) {
    let rotation = Vec2::from_angle(angle);
    let place = |x: f32, y: f32| tip + rotation.rotate(Vec2::new(x, y));

    commands.push(DrawCommand::Polygon {
        points: vec![
            place(0.0, -8.0),
            place(12.0, -8.0),
            place(12.0, 8.0),
            place(0.0, 8.0),
        ],
        fill: Some(palette::STEEL_DARK),
        stroke: None,
    });
    commands.push(DrawCommand::Polygon {
        points: vec![
            place(12.0, -4.0),
            place(24.0, -1.0),
            place(24.0, 1.0),
            place(12.0, 4.0),
        ],
        fill: Some(palette::NOZZLE),
        stroke: None,
    });
}

fn draw_crosshair(commands: &mut Vec<DrawCommand>, target: Vec2) {
    let stroke = Stroke::new(1.0, palette::CROSSHAIR);
    for axis in [Vec2::X, Vec2::Y] {
        commands.push(DrawCommand::Line {
            from: target - axis * CROSSHAIR_ARM,
            to: target + axis * CROSSHAIR_ARM,
            stroke,
            round_cap: false,
        });
    }
}
