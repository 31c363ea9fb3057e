//! Autonomous "travel then weld" behaviour used while nobody is steering the arm.

use std::f32::consts::PI;
use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IdleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IdleState {
    /// Travelling towards the current idle pose.
    Moving,
    /// Dwelling at the pose until `since + dwell` has passed.
    Welding { since: Duration, dwell: Duration },
}

impl IdleState {
    pub fn is_welding(&self) -> bool {
        matches!(self, IdleState::Welding { .. })
    }
}

#[derive(Debug, Clone)]
pub struct IdleController {
    config: IdleConfig,
    state: IdleState,
    idle_target: Vec2,
}

impl IdleController {
    pub fn new<R: Rng + ?Sized>(config: IdleConfig, base: Vec2, reach: f32, rng: &mut R) -> Self {
        let idle_target = sample_idle_target(&config, base, reach, rng);
        Self {
            config,
            state: IdleState::Moving,
            idle_target,
        }
    }

    pub fn state(&self) -> IdleState {
        self.state
    }

    pub fn idle_target(&self) -> Vec2 {
        self.idle_target
    }

    /// Picks a fresh pose without touching the state.
    pub fn resample<R: Rng + ?Sized>(&mut self, base: Vec2, reach: f32, rng: &mut R) {
        self.idle_target = sample_idle_target(&self.config, base, reach, rng);
    }

    /// Eases `target` towards the idle pose and advances the state machine.
    pub fn drive<R: Rng + ?Sized>(
        &mut self,
        target: &mut Vec2,
        now: Duration,
        base: Vec2,
        reach: f32,
        rng: &mut R,
    ) {
        match self.state {
            IdleState::Moving => {
                *target += (self.idle_target - *target) * self.config.travel_easing;
                if target.distance(self.idle_target) < self.config.arrive_distance {
                    let dwell = sample_dwell(&self.config, rng);
                    debug!(?dwell, "idle arm reached pose, welding");
                    self.state = IdleState::Welding { since: now, dwell };
                }
            }
            IdleState::Welding { since, dwell } => {
                *target += (self.idle_target - *target) * self.config.dwell_easing;
                if now.saturating_sub(since) > dwell {
                    debug!("idle weld finished, moving to a new pose");
                    self.state = IdleState::Moving;
                    self.resample(base, reach, rng);
                }
            }
        }
    }

    /// User input arrived: abandon any weld in progress.
    pub fn interrupt<R: Rng + ?Sized>(&mut self, base: Vec2, reach: f32, rng: &mut R) {
        if self.state.is_welding() {
            debug!("weld interrupted by input");
            self.state = IdleState::Moving;
            self.resample(base, reach, rng);
        }
    }
}

/// Polar sample in the upward arc above `base`, `reach` being the total chain length.
pub fn sample_idle_target<R: Rng + ?Sized>(
    config: &IdleConfig,
    base: Vec2,
    reach: f32,
    rng: &mut R,
) -> Vec2 {
    let distance = reach * rng.gen_range(config.min_reach..=config.max_reach);
    let sweep = (PI - 2.0 * config.arc_margin).max(0.0);
    let angle = -config.arc_margin - rng.gen::<f32>() * sweep;
    base + Vec2::from_angle(angle) * distance
}

pub fn sample_dwell<R: Rng + ?Sized>(config: &IdleConfig, rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(config.dwell_min_ms..config.dwell_max_ms))
}
