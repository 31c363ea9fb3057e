//! Weld sparks: short-lived particles thrown from the tool tip.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SparkConfig;
use crate::render::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub position: Vec2,
    /// Position before the most recent update, the tail of the drawn streak.
    pub previous: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
}

impl Spark {
    /// Remaining life relative to the spark's cooling span.
    pub fn ratio(&self) -> f32 {
        self.life / self.max_life
    }

    /// White-hot, then cyan, then blue as the spark cools.
    pub fn color(&self) -> Rgba {
        let ratio = self.ratio();
        let alpha = ratio.clamp(0.0, 1.0);
        if ratio > 0.7 {
            Rgba::new(255, 255, 255, alpha)
        } else if ratio > 0.3 {
            Rgba::new(0, 243, 255, alpha)
        } else {
            Rgba::new(0, 100, 255, alpha)
        }
    }

    pub fn stroke_width(&self) -> f32 {
        (self.ratio() * 2.5).max(0.5)
    }

    fn step(&mut self, config: &SparkConfig, ground: f32) {
        self.previous = self.position;
        self.position += self.velocity;
        self.velocity.y += config.gravity;
        self.velocity.x *= config.drag_x;
        self.velocity.y *= config.drag_y;
        self.life -= config.life_step;

        if self.position.y > ground {
            self.position.y = ground;
            self.velocity.y *= -config.bounce;
            self.velocity.x *= config.bounce_friction;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SparkEmitter {
    config: SparkConfig,
    sparks: Vec<Spark>,
}

impl SparkEmitter {
    pub fn new(config: SparkConfig) -> Self {
        Self {
            config,
            sparks: Vec::new(),
        }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }

    /// Rolls the per-frame spawn chance and emits a burst at `tip` on success.
    /// Returns how many sparks were added.
    pub fn emit<R: Rng + ?Sized>(&mut self, tip: Vec2, rng: &mut R) -> usize {
        if rng.gen::<f32>() >= self.config.spawn_chance {
            return 0;
        }
        let burst = rng.gen_range(self.config.burst_min..=self.config.burst_max) as usize;
        let room = self.config.max_sparks.saturating_sub(self.sparks.len());
        let count = burst.min(room);
        for _ in 0..count {
            let spark = self.spawn(tip, rng);
            self.sparks.push(spark);
        }
        count
    }

    fn spawn<R: Rng + ?Sized>(&self, tip: Vec2, rng: &mut R) -> Spark {
        let config = &self.config;
        let angle = FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * config.cone;
        let speed = rng.gen_range(config.min_speed..config.max_speed);
        Spark {
            position: tip,
            previous: tip,
            velocity: Vec2::from_angle(angle) * speed,
            life: 1.0,
            max_life: rng.gen_range(config.min_max_life..config.max_max_life),
        }
    }

    /// Advances every spark once and drops the ones that burned out.
    /// Sparks falling past `ground` bounce off it.
    pub fn update(&mut self, ground: f32) {
        let config = &self.config;
        self.sparks.retain_mut(|spark| {
            spark.step(config, ground);
            spark.life > 0.0
        });
    }
}
