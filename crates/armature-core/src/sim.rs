use std::time::Duration;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chain::{solve, Chain};
use crate::config::{ArmConfig, ArmatureConfig, IdleConfig, InputConfig};
use crate::error::Result;
use crate::idle::{IdleController, IdleState};
use crate::input::{format_coordinate, tilt_to_point, InputEvent};
use crate::render::{render, DrawCommand, Scene};
use crate::sparks::{Spark, SparkEmitter};

/// What the host knows about the device before deciding to run the arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub width: f32,
    pub touch: bool,
}

/// The arm is a large-screen pointer feature; touch devices only get it in gyro mode.
pub fn arm_enabled(profile: &DeviceProfile, config: &ArmConfig, gyro_requested: bool) -> bool {
    if gyro_requested {
        return true;
    }
    profile.width > config.min_viewport_width && !profile.touch
}

/// All mutable arm state, advanced by input events and one `tick` per frame.
#[derive(Debug, Clone)]
pub struct ArmSimulation {
    arm: ArmConfig,
    idle_config: IdleConfig,
    input: InputConfig,
    size: Vec2,
    chain: Chain,
    reach: f32,
    target: Vec2,
    pointer: Vec2,
    last_pointer: Vec2,
    /// Time of the last real input; stamped by the first tick when still unset.
    last_input: Option<Duration>,
    idle: bool,
    pressed: bool,
    gyro: bool,
    controller: IdleController,
    emitter: SparkEmitter,
    glow: Option<f32>,
    rng: StdRng,
}

impl ArmSimulation {
    pub fn new(config: &ArmatureConfig, size: Vec2, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let base = base_for(size);
        let chain = Chain::new(base, &config.arm.segment_lengths, config.arm.initial_spacing)?;
        let reach = chain.total_length();
        let controller = IdleController::new(config.idle.clone(), base, reach, &mut rng);
        let center = size / 2.0;
        info!(
            segments = chain.len(),
            reach,
            width = size.x,
            height = size.y,
            "arm simulation initialised"
        );
        Ok(Self {
            arm: config.arm.clone(),
            idle_config: config.idle.clone(),
            input: config.input.clone(),
            size,
            chain,
            reach,
            target: center,
            pointer: center,
            last_pointer: center,
            last_input: None,
            idle: false,
            pressed: false,
            gyro: false,
            controller,
            emitter: SparkEmitter::new(config.sparks.clone()),
            glow: None,
            rng,
        })
    }

    /// Deterministic simulation, for tests and reproducible captures.
    pub fn with_seed(config: &ArmatureConfig, size: Vec2, seed: u64) -> Result<Self> {
        Self::new(config, size, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &ArmatureConfig, size: Vec2) -> Result<Self> {
        Self::new(config, size, StdRng::from_entropy())
    }

    /// Rebuilds the chain for a new viewport. The target jumps to the new centre.
    pub fn reinit(&mut self, size: Vec2) -> Result<()> {
        let base = base_for(size);
        self.chain = Chain::new(base, &self.arm.segment_lengths, self.arm.initial_spacing)?;
        self.reach = self.chain.total_length();
        self.size = size;
        self.target = size / 2.0;
        self.controller.resample(base, self.reach, &mut self.rng);
        debug!(width = size.x, height = size.y, "arm reinitialised for new viewport");
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Duration) {
        match event {
            InputEvent::PointerMove(position) => self.pointer_moved(position, now),
            InputEvent::Tilt { beta, gamma } => {
                if self.gyro {
                    let position = tilt_to_point(&self.input, beta, gamma, self.size);
                    self.pointer_moved(position, now);
                }
            }
            InputEvent::PointerDown => {
                self.pressed = true;
                self.resume_control(now);
            }
            InputEvent::PointerUp => self.pressed = false,
        }
    }

    fn pointer_moved(&mut self, position: Vec2, now: Duration) {
        if position.distance(self.last_pointer) > self.idle_config.move_threshold {
            self.resume_control(now);
        }
        self.pointer = position;
        self.last_pointer = position;
    }

    fn resume_control(&mut self, now: Duration) {
        if self.idle {
            debug!("input received, leaving idle mode");
        }
        self.last_input = Some(now);
        self.idle = false;
        self.controller
            .interrupt(self.chain.base(), self.reach, &mut self.rng);
    }

    /// One frame: pick the target, solve the chain, run the sparks.
    pub fn tick(&mut self, now: Duration) {
        let last_input = *self.last_input.get_or_insert(now);
        if !self.pressed
            && !self.idle
            && now.saturating_sub(last_input) > self.idle_config.timeout()
        {
            debug!("no input for {:?}, entering idle mode", self.idle_config.timeout());
            self.idle = true;
        }

        if self.idle {
            self.controller.drive(
                &mut self.target,
                now,
                self.chain.base(),
                self.reach,
                &mut self.rng,
            );
        } else {
            self.target += (self.pointer - self.target) * self.arm.follow_easing;
        }

        solve(&mut self.chain, self.target);

        if self.is_working() {
            self.glow = Some(self.rng.gen_range(6.0..12.0));
            self.emitter.emit(self.chain.tip(), &mut self.rng);
        } else {
            self.glow = None;
        }
        self.emitter.update(self.chain.base().y);
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            size: self.size,
            chain: &self.chain,
            target: self.target,
            idle: self.idle,
            glow: self.glow,
            sparks: self.emitter.sparks(),
        }
    }

    pub fn frame(&self) -> Vec<DrawCommand> {
        render(&self.scene())
    }

    pub fn is_working(&self) -> bool {
        (self.idle && self.controller.state().is_welding()) || self.pressed
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn idle_state(&self) -> IdleState {
        self.controller.state()
    }

    pub fn idle_target(&self) -> Vec2 {
        self.controller.idle_target()
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn sparks(&self) -> &[Spark] {
        self.emitter.sparks()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn gyro_enabled(&self) -> bool {
        self.gyro
    }

    pub fn set_gyro_enabled(&mut self, enabled: bool) {
        self.gyro = enabled;
    }

    /// Zero-padded `(x, y)` pointer readout for the HUD.
    pub fn cursor_readout(&self) -> (String, String) {
        (format_coordinate(self.pointer.x), format_coordinate(self.pointer.y))
    }
}

fn base_for(size: Vec2) -> Vec2 {
    Vec2::new(size.x / 2.0, size.y)
}

/// Stoppable driver around [`ArmSimulation::tick`].
#[derive(Debug, Clone)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: true,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(frames = self.frames, "arm frame loop stopped");
        }
        self.running = false;
    }

    /// Ticks and renders one frame, or does nothing once stopped.
    pub fn advance(&mut self, sim: &mut ArmSimulation, now: Duration) -> Option<Vec<DrawCommand>> {
        if !self.running {
            return None;
        }
        sim.tick(now);
        self.frames += 1;
        Some(sim.frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(1600.0, 900.0);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn sim() -> ArmSimulation {
        ArmSimulation::with_seed(&ArmatureConfig::default(), SIZE, 42).unwrap()
    }

    #[test]
    fn base_sits_at_bottom_centre() {
        let sim = sim();
        assert_eq!(sim.chain().base(), Vec2::new(800.0, 900.0));
        assert_eq!(sim.target(), Vec2::new(800.0, 450.0));
    }

    #[test]
    fn goes_idle_only_after_timeout() {
        let mut sim = sim();
        sim.tick(ms(0));
        sim.tick(ms(2500));
        assert!(!sim.is_idle());
        sim.tick(ms(2501));
        assert!(sim.is_idle());
    }

    #[test]
    fn idle_timeout_counts_from_the_first_frame() {
        let mut sim = sim();
        sim.tick(ms(60_000));
        assert!(!sim.is_idle());
        sim.tick(ms(62_500));
        assert!(!sim.is_idle());
        sim.tick(ms(62_501));
        assert!(sim.is_idle());
    }

    #[test]
    fn tip_settles_on_the_starting_crosshair() {
        let mut sim =
            ArmSimulation::with_seed(&ArmatureConfig::default(), Vec2::new(1400.0, 700.0), 1)
                .unwrap();
        for frame in 0..150 {
            sim.tick(ms(frame * 16));
        }
        assert!(!sim.is_idle());
        assert_eq!(sim.target(), Vec2::new(700.0, 350.0));
        let miss = sim.chain().tip().distance(sim.target());
        assert!(miss < 0.05, "miss {miss}");
    }

    #[test]
    fn non_finite_reach_is_refused_up_front() {
        let mut config = ArmatureConfig::default();
        config.idle.max_reach = f32::INFINITY;
        assert!(ArmSimulation::with_seed(&config, SIZE, 7).is_err());
    }

    #[test]
    fn held_press_prevents_idle() {
        let mut sim = sim();
        sim.handle_input(InputEvent::PointerDown, ms(0));
        sim.tick(ms(10_000));
        assert!(!sim.is_idle());
        assert!(sim.is_working());
    }

    #[test]
    fn small_moves_do_not_count_as_input() {
        let mut sim = sim();
        sim.tick(ms(0));
        sim.tick(ms(3000));
        assert!(sim.is_idle());
        sim.handle_input(InputEvent::PointerMove(Vec2::new(803.0, 452.0)), ms(3100));
        assert!(sim.is_idle());
        sim.handle_input(InputEvent::PointerMove(Vec2::new(820.0, 452.0)), ms(3200));
        assert!(!sim.is_idle());
    }

    #[test]
    fn press_interrupts_a_weld() {
        let mut sim = sim();
        sim.tick(ms(0));
        let mut now = ms(3000);
        while !sim.idle_state().is_welding() {
            sim.tick(now);
            now += ms(16);
            assert!(now < ms(60_000), "idle arm never started welding");
        }
        assert!(sim.is_working());
        let pose = sim.idle_target();

        sim.handle_input(InputEvent::PointerDown, now);
        assert!(!sim.is_idle());
        assert_eq!(sim.idle_state(), IdleState::Moving);
        assert_ne!(sim.idle_target(), pose);
    }

    #[test]
    fn pressing_throws_sparks_that_land_above_the_floor() {
        let mut sim = sim();
        sim.handle_input(InputEvent::PointerDown, ms(0));
        for frame in 0..120 {
            sim.tick(ms(frame * 16));
        }
        assert!(!sim.sparks().is_empty());
        let floor = sim.chain().base().y;
        assert!(sim.sparks().iter().all(|spark| spark.position.y <= floor));

        sim.handle_input(InputEvent::PointerUp, ms(2000));
        for frame in 0..100 {
            sim.tick(ms(2000 + frame * 16));
        }
        assert!(sim.sparks().is_empty());
    }

    #[test]
    fn target_eases_towards_pointer() {
        let mut sim = sim();
        sim.handle_input(InputEvent::PointerMove(Vec2::new(900.0, 450.0)), ms(0));
        sim.tick(ms(16));
        assert!((sim.target().x - 808.0).abs() < 1e-3);
    }

    #[test]
    fn tilt_is_ignored_until_gyro_mode() {
        let mut sim = sim();
        let tilt = InputEvent::Tilt {
            beta: 45.0,
            gamma: 30.0,
        };
        sim.handle_input(tilt, ms(0));
        assert_eq!(sim.pointer(), Vec2::new(800.0, 450.0));

        sim.set_gyro_enabled(true);
        sim.handle_input(tilt, ms(0));
        assert_eq!(sim.pointer(), Vec2::new(1600.0, 450.0));
        assert_eq!(sim.cursor_readout(), ("1600".to_string(), "0450".to_string()));
    }

    #[test]
    fn reinit_moves_the_base_and_recentres_the_target() {
        let mut sim = sim();
        sim.reinit(Vec2::new(1400.0, 700.0)).unwrap();
        assert_eq!(sim.chain().base(), Vec2::new(700.0, 700.0));
        assert_eq!(sim.target(), Vec2::new(700.0, 350.0));
        assert_eq!(sim.chain().segments()[0].position, Vec2::new(700.0, 700.0));
    }

    #[test]
    fn stopped_loop_produces_no_frames() {
        let mut sim = sim();
        let mut frames = FrameLoop::new();
        assert!(frames.advance(&mut sim, ms(0)).is_some());
        frames.stop();
        assert!(frames.advance(&mut sim, ms(16)).is_none());
        assert_eq!(frames.frames(), 1);
    }

    #[test]
    fn small_and_touch_screens_skip_the_arm() {
        let config = ArmConfig::default();
        let desktop = DeviceProfile {
            width: 1920.0,
            touch: false,
        };
        let laptop = DeviceProfile {
            width: 1280.0,
            touch: false,
        };
        let tablet = DeviceProfile {
            width: 1920.0,
            touch: true,
        };
        assert!(arm_enabled(&desktop, &config, false));
        assert!(!arm_enabled(&laptop, &config, false));
        assert!(!arm_enabled(&tablet, &config, false));
        assert!(arm_enabled(&tablet, &config, true));
    }
}
