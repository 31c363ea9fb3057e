//! Tunables for the arm simulation and the page behaviours, loadable from TOML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    /// Segment lengths from the base outwards.
    pub segment_lengths: Vec<f32>,
    /// Vertical spacing of the joints in the initial pose.
    pub initial_spacing: f32,
    /// Per-frame easing of the target towards the pointer.
    pub follow_easing: f32,
    /// Narrower viewports run without the arm.
    pub min_viewport_width: f32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            segment_lengths: vec![130.0, 110.0, 90.0, 70.0],
            initial_spacing: 50.0,
            follow_easing: 0.08,
            min_viewport_width: 1366.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    pub timeout_ms: u64,
    /// Pointer travel below this distance does not count as user input.
    pub move_threshold: f32,
    pub arrive_distance: f32,
    pub travel_easing: f32,
    pub dwell_easing: f32,
    pub dwell_min_ms: u64,
    pub dwell_max_ms: u64,
    /// Fractions of the total chain length.
    pub min_reach: f32,
    pub max_reach: f32,
    /// Angular margin (radians) kept clear of the horizon on both sides.
    pub arc_margin: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2500,
            move_threshold: 5.0,
            arrive_distance: 5.0,
            travel_easing: 0.012,
            dwell_easing: 0.1,
            dwell_min_ms: 1200,
            dwell_max_ms: 2700,
            min_reach: 0.3,
            max_reach: 0.85,
            arc_margin: 0.2,
        }
    }
}

impl IdleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    /// Chance per frame that a working tool emits a burst.
    pub spawn_chance: f32,
    pub burst_min: u32,
    pub burst_max: u32,
    /// Width of the emission cone in radians, centred straight down.
    pub cone: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_max_life: f32,
    pub max_max_life: f32,
    pub gravity: f32,
    pub drag_x: f32,
    pub drag_y: f32,
    pub life_step: f32,
    pub bounce: f32,
    pub bounce_friction: f32,
    pub max_sparks: usize,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.6,
            burst_min: 1,
            burst_max: 2,
            cone: 2.0,
            min_speed: 2.0,
            max_speed: 8.0,
            min_max_life: 0.5,
            max_max_life: 1.3,
            gravity: 0.3,
            drag_x: 0.94,
            drag_y: 0.96,
            life_step: 0.02,
            bounce: 0.3,
            bounce_friction: 0.7,
            max_sparks: 512,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Tilt (degrees) that maps onto the full canvas extent on each side.
    pub tilt_range: f32,
    /// Front/back tilt that counts as level.
    pub neutral_beta: f32,
    pub resize_debounce_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tilt_range: 30.0,
            neutral_beta: 45.0,
            resize_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub roles: Vec<String>,
    pub start_delay_ms: u64,
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_ms: u64,
    pub next_role_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            roles: vec![
                "MECHANICAL_ENGINEER".into(),
                "ROBOTICS_ENTHUSIAST".into(),
                "PRODUCT_DESIGNER".into(),
                "SYSTEMS_INTEGRATOR".into(),
            ],
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 40,
            hold_ms: 2000,
            next_role_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub modal_close_delay_ms: u64,
    pub reveal_threshold: f32,
    pub clock_interval_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            modal_close_delay_ms: 400,
            reveal_threshold: 0.1,
            clock_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmatureConfig {
    pub arm: ArmConfig,
    pub idle: IdleConfig,
    pub sparks: SparkConfig,
    pub input: InputConfig,
    pub typewriter: TypewriterConfig,
    pub page: PageConfig,
}

impl ArmatureConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        let (arm, idle, sparks) = (&self.arm, &self.idle, &self.sparks);
        for (name, value) in [
            ("arm.initial_spacing", arm.initial_spacing),
            ("arm.follow_easing", arm.follow_easing),
            ("arm.min_viewport_width", arm.min_viewport_width),
            ("idle.move_threshold", idle.move_threshold),
            ("idle.arrive_distance", idle.arrive_distance),
            ("idle.travel_easing", idle.travel_easing),
            ("idle.dwell_easing", idle.dwell_easing),
            ("idle.min_reach", idle.min_reach),
            ("idle.max_reach", idle.max_reach),
            ("idle.arc_margin", idle.arc_margin),
            ("sparks.spawn_chance", sparks.spawn_chance),
            ("sparks.cone", sparks.cone),
            ("sparks.min_speed", sparks.min_speed),
            ("sparks.max_speed", sparks.max_speed),
            ("sparks.min_max_life", sparks.min_max_life),
            ("sparks.max_max_life", sparks.max_max_life),
            ("sparks.gravity", sparks.gravity),
            ("sparks.drag_x", sparks.drag_x),
            ("sparks.drag_y", sparks.drag_y),
            ("sparks.life_step", sparks.life_step),
            ("sparks.bounce", sparks.bounce),
            ("sparks.bounce_friction", sparks.bounce_friction),
            ("input.tilt_range", self.input.tilt_range),
            ("input.neutral_beta", self.input.neutral_beta),
            ("page.reveal_threshold", self.page.reveal_threshold),
        ] {
            if !value.is_finite() {
                return Err(CoreError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.arm.segment_lengths.is_empty() {
            return Err(CoreError::invalid_config("arm.segment_lengths is empty"));
        }
        if let Some(bad) = self
            .arm
            .segment_lengths
            .iter()
            .find(|length| !(length.is_finite() && **length > 0.0))
        {
            return Err(CoreError::invalid_config(format!(
                "arm.segment_lengths contains non-positive length {bad}"
            )));
        }
        for (name, value) in [
            ("arm.follow_easing", self.arm.follow_easing),
            ("idle.travel_easing", self.idle.travel_easing),
            ("idle.dwell_easing", self.idle.dwell_easing),
            ("sparks.spawn_chance", self.sparks.spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::invalid_config(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        if idle.min_reach > idle.max_reach || idle.min_reach < 0.0 {
            return Err(CoreError::invalid_config(format!(
                "idle reach range [{}, {}] is inverted or negative",
                idle.min_reach, idle.max_reach
            )));
        }
        if idle.dwell_min_ms >= idle.dwell_max_ms {
            return Err(CoreError::invalid_config(format!(
                "idle dwell range [{}, {}) is empty",
                idle.dwell_min_ms, idle.dwell_max_ms
            )));
        }
        if !(0.0..std::f32::consts::FRAC_PI_2).contains(&idle.arc_margin) {
            return Err(CoreError::invalid_config(format!(
                "idle.arc_margin must lie in [0, pi/2), got {}",
                idle.arc_margin
            )));
        }
        if sparks.burst_min > sparks.burst_max
            || sparks.min_speed >= sparks.max_speed
            || sparks.min_max_life >= sparks.max_max_life
            || sparks.min_max_life <= 0.0
        {
            return Err(CoreError::invalid_config("spark ranges are empty or inverted"));
        }
        if sparks.life_step <= 0.0 {
            return Err(CoreError::invalid_config("sparks.life_step must be positive"));
        }
        if self.input.tilt_range <= 0.0 {
            return Err(CoreError::invalid_config("input.tilt_range must be positive"));
        }
        if self.typewriter.roles.iter().any(String::is_empty) {
            return Err(CoreError::invalid_config("typewriter roles must not be empty strings"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ArmatureConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ArmatureConfig::from_toml_str(
            r#"
            [arm]
            segment_lengths = [100.0, 80.0]

            [idle]
            timeout_ms = 4000
            "#,
        )
        .unwrap();
        assert_eq!(config.arm.segment_lengths, vec![100.0, 80.0]);
        assert_eq!(config.arm.follow_easing, 0.08);
        assert_eq!(config.idle.timeout(), Duration::from_millis(4000));
        assert_eq!(config.sparks, SparkConfig::default());
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let err = ArmatureConfig::from_toml_str("[arm]\nsegment_lengths = [10.0, 0.0]\n")
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_dwell_range() {
        let mut config = ArmatureConfig::default();
        config.idle.dwell_max_ms = config.idle.dwell_min_ms;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        for source in [
            "[idle]\nmax_reach = inf\n",
            "[sparks]\nmin_speed = nan\n",
            "[input]\ntilt_range = nan\n",
            "[arm]\ninitial_spacing = -inf\n",
        ] {
            let err = ArmatureConfig::from_toml_str(source).unwrap_err();
            assert!(matches!(err, CoreError::InvalidConfig(_)), "{source:?} gave {err}");
        }
    }

    #[test]
    fn rejects_arc_margin_that_closes_the_arc() {
        let mut config = ArmatureConfig::default();
        config.idle.arc_margin = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../armature.toml");
        assert_eq!(
            ArmatureConfig::from_toml_str(shipped).unwrap(),
            ArmatureConfig::default()
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ArmatureConfig::from_toml_str("[arm\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }
}
