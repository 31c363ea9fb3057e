//! Desktop implementations of the platform traits.

use armature_platform::{
    DisplaySurface, Fullscreen, History, OrientationSensor, Permission, Result, Viewport, WallClock,
};
use chrono::Timelike;
use tracing::debug;

/// Browser-style history kept in memory; the desktop has no address bar.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Option<String>>,
}

impl MemoryHistory {
    /// Accepts the fragment with or without its leading `#`.
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            entries: vec![normalise(initial)],
        }
    }

    /// The fragment as it would appear in a URL, `#id` or empty.
    pub fn location(&self) -> String {
        self.fragment().map(|id| format!("#{id}")).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalise(fragment: Option<&str>) -> Option<String> {
    fragment
        .map(|raw| raw.trim().trim_start_matches('#'))
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
}

impl History for MemoryHistory {
    fn fragment(&self) -> Option<String> {
        self.entries.last().cloned().flatten()
    }

    fn push_fragment(&mut self, fragment: Option<&str>) {
        let entry = normalise(fragment);
        debug!(fragment = ?entry, "history push");
        self.entries.push(entry);
    }
}

pub struct LocalClock;

impl WallClock for LocalClock {
    fn local_time(&self) -> (u32, u32, u32) {
        let now = chrono::Local::now();
        (now.hour(), now.minute(), now.second())
    }
}

/// Desktop hosts expose no tilt sensor, so gyro mode can never be granted here
/// and no `Tilt` events are produced.
pub struct DesktopOrientation;

impl OrientationSensor for DesktopOrientation {
    fn request_permission(&mut self) -> Result<Permission> {
        Err("device orientation is not available on this host".into())
    }
}

/// The egui screen acting as canvas and fullscreen target.
pub struct ScreenHost<'a> {
    ctx: &'a egui::Context,
}

impl<'a> ScreenHost<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl DisplaySurface for ScreenHost<'_> {
    fn viewport(&self) -> Option<Viewport> {
        let rect = self.ctx.screen_rect();
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return None;
        }
        Some(Viewport {
            width: rect.width(),
            height: rect.height(),
            touch: self.ctx.input(|i| i.any_touches()),
        })
    }
}

impl Fullscreen for ScreenHost<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen)
            .unwrap_or(false)
    }

    fn set_fullscreen(&mut self, enabled: bool) -> Result<()> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(enabled));
        Ok(())
    }
}
