//! Host abstraction traits so `armature-core` and the page controllers stay host-agnostic.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Whether the primary pointer is a touch screen.
    pub touch: bool,
}

/// Outcome of asking the user for device-orientation access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Granted,
    Denied,
}

/// Drawing surface for the arm. `None` means the host has nothing to draw on.
pub trait DisplaySurface {
    fn viewport(&self) -> Option<Viewport>;
}

/// Device tilt sensor, gated behind an explicit permission request.
pub trait OrientationSensor {
    fn request_permission(&mut self) -> Result<Permission>;
}

pub trait Fullscreen {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, enabled: bool) -> Result<()>;
}

/// Location fragment (`#id`) used for deep links.
pub trait History {
    /// Current fragment without the leading `#`.
    fn fragment(&self) -> Option<String>;
    /// Pushes a new history entry; `None` clears the fragment.
    fn push_fragment(&mut self, fragment: Option<&str>);
}

/// Local time of day as `(hours, minutes, seconds)`.
pub trait WallClock {
    fn local_time(&self) -> (u32, u32, u32);
}
