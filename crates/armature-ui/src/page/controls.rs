//! Gyroscope and fullscreen toggles.

use armature_platform::{Fullscreen, OrientationSensor, Permission};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct GyroToggle {
    enabled: bool,
}

impl GyroToggle {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips gyro mode. Enabling asks the sensor for permission first and
    /// stays off if that is refused or unavailable.
    pub fn toggle<S: OrientationSensor + ?Sized>(&mut self, sensor: &mut S) -> bool {
        if self.enabled {
            self.enabled = false;
            info!("gyro control disabled");
            return false;
        }
        match sensor.request_permission() {
            Ok(Permission::Granted) => {
                self.enabled = true;
                info!("gyro control enabled");
            }
            Ok(Permission::Denied) => warn!("device orientation permission denied"),
            Err(err) => warn!("device orientation unavailable: {err}"),
        }
        self.enabled
    }
}

pub fn toggle_fullscreen<F: Fullscreen + ?Sized>(host: &mut F) {
    let enable = !host.is_fullscreen();
    if let Err(err) = host.set_fullscreen(enable) {
        warn!("failed to change fullscreen state: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armature_platform::Result;

    struct Sensor {
        answer: Option<Permission>,
        asked: usize,
    }

    impl OrientationSensor for Sensor {
        fn request_permission(&mut self) -> Result<Permission> {
            self.asked += 1;
            self.answer.ok_or_else(|| "no sensor".into())
        }
    }

    #[derive(Default)]
    struct Screen {
        fullscreen: bool,
    }

    impl Fullscreen for Screen {
        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn set_fullscreen(&mut self, enabled: bool) -> Result<()> {
            self.fullscreen = enabled;
            Ok(())
        }
    }

    #[test]
    fn granted_permission_enables_and_disabling_never_asks() {
        let mut sensor = Sensor {
            answer: Some(Permission::Granted),
            asked: 0,
        };
        let mut toggle = GyroToggle::default();
        assert!(toggle.toggle(&mut sensor));
        assert!(!toggle.toggle(&mut sensor));
        assert_eq!(sensor.asked, 1);
    }

    #[test]
    fn denial_or_missing_sensor_leaves_toggle_off() {
        let mut toggle = GyroToggle::default();
        let mut denied = Sensor {
            answer: Some(Permission::Denied),
            asked: 0,
        };
        assert!(!toggle.toggle(&mut denied));
        let mut missing = Sensor {
            answer: None,
            asked: 0,
        };
        assert!(!toggle.toggle(&mut missing));
        assert!(!toggle.is_enabled());
    }

    #[test]
    fn fullscreen_flips() {
        let mut screen = Screen::default();
        toggle_fullscreen(&mut screen);
        assert!(screen.fullscreen);
        toggle_fullscreen(&mut screen);
        assert!(!screen.fullscreen);
    }
}
