use std::fmt;

use serde::{Deserialize, Serialize};

/// Wall-clock time of day shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Text shown in the heads-up display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudReadout {
    pub clock: String,
    pub cursor_x: String,
    pub cursor_y: String,
    pub role: String,
}

impl HudReadout {
    pub fn new() -> Self {
        Self {
            clock: "--:--:--".into(),
            cursor_x: "0000".into(),
            cursor_y: "0000".into(),
            role: String::new(),
        }
    }
}

impl Default for HudReadout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(ClockTime::new(7, 3, 9).to_string(), "07:03:09");
        assert_eq!(ClockTime::new(23, 59, 59).to_string(), "23:59:59");
    }

    #[test]
    fn default_readout_shows_placeholders() {
        let hud = HudReadout::default();
        assert_eq!(hud, HudReadout::new());
        assert_eq!(hud.clock, "--:--:--");
        assert_eq!((hud.cursor_x.as_str(), hud.cursor_y.as_str()), ("0000", "0000"));
    }
}
