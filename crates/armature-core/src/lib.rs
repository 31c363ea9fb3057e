//! Armature core engine: platform-agnostic logic for the robotic arm, its sparks, and the page HUD.

pub mod catalog;
pub mod chain;
pub mod config;
pub mod error;
pub mod hud;
pub mod idle;
pub mod input;
pub mod render;
pub mod sim;
pub mod sparks;
pub mod timing;
pub mod typewriter;

pub use catalog::{LinkKind, ProjectCatalog, ProjectLink, ProjectRecord};
pub use chain::{solve, Chain, Segment};
pub use config::ArmatureConfig;
pub use error::{CoreError, Result};
pub use hud::{ClockTime, HudReadout};
pub use idle::{IdleController, IdleState};
pub use input::InputEvent;
pub use render::{render, DrawCommand, Rgba, Scene, Stroke};
pub use sim::{arm_enabled, ArmSimulation, DeviceProfile, FrameLoop};
pub use sparks::{Spark, SparkEmitter};
pub use timing::{Debouncer, Interval};
pub use typewriter::{Typewriter, TypewriterStep};

pub use glam::Vec2;
