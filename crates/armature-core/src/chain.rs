//! Rigid segment chain anchored at a fixed base, and the single-pass reaching solver.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Curl applied to a chain lying on the base-to-target line so the passes can bend it.
const UNFOLD_BEND: f32 = 0.1;
/// Perpendicular distance under which a joint counts as lying on that line.
const COLLINEAR_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Proximal joint.
    pub position: Vec2,
    /// Heading in radians.
    pub angle: f32,
    length: f32,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Unit vector along the current heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Distal joint.
    pub fn end(&self) -> Vec2 {
        self.position + self.direction() * self.length
    }

    /// Points the segment at `target` and slides it back so its distal end sits on it.
    fn reach(&mut self, target: Vec2) {
        let delta = target - self.position;
        self.angle = delta.y.atan2(delta.x);
        self.position = target - self.direction() * self.length;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    base: Vec2,
    segments: Vec<Segment>,
}

impl Chain {
    /// Builds a chain with its joints stacked straight up from `base`.
    pub fn new(base: Vec2, lengths: &[f32], spacing: f32) -> Result<Self> {
        if lengths.is_empty() {
            return Err(CoreError::invalid_chain("a chain needs at least one segment"));
        }
        if let Some((index, length)) = lengths
            .iter()
            .enumerate()
            .find(|(_, length)| !(length.is_finite() && **length > 0.0))
        {
            return Err(CoreError::invalid_chain(format!(
                "segment {index} has non-positive length {length}"
            )));
        }
        let segments = lengths
            .iter()
            .enumerate()
            .map(|(index, &length)| Segment {
                position: base - Vec2::new(0.0, index as f32 * spacing),
                angle: 0.0,
                length,
            })
            .collect();
        Ok(Self { base, segments })
    }

    pub fn base(&self) -> Vec2 {
        self.base
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// End-effector position.
    pub fn tip(&self) -> Vec2 {
        self.segments
            .last()
            .map_or(self.base, Segment::end)
    }

    /// Heading of the last segment, which the tool is aligned with.
    pub fn tip_angle(&self) -> f32 {
        self.segments.last().map_or(0.0, |segment| segment.angle)
    }

    /// Whether every joint sits on the line from the base through `target`.
    fn lies_on_line_to(&self, target: Vec2) -> bool {
        let Some(axis) = (target - self.base).try_normalize() else {
            return false;
        };
        self.segments
            .iter()
            .all(|segment| axis.perp_dot(segment.position - self.base).abs() < COLLINEAR_TOLERANCE)
    }

    /// Re-lays the chain from the base as a gentle curl around `heading`.
    fn curl(&mut self, heading: f32) {
        let mut joint = self.base;
        for segment in &mut self.segments {
            segment.position = joint;
            segment.angle = heading + UNFOLD_BEND;
            joint = segment.end();
        }
    }
}

/// One backward-then-forward reaching pass towards `target`.
///
/// The pass is not iterated to convergence: calling it once per frame while the
/// target moves gives hinged, slightly lagging motion. Joint angles are left
/// unconstrained. Targets beyond the chain's reach leave it fully extended
/// along the base-to-target line after repeated passes.
///
/// A chain lying straight on the line to a target it could reach cannot bend
/// out of that line on its own, so it is curled slightly before the pass.
pub fn solve(chain: &mut Chain, target: Vec2) {
    let offset = target - chain.base;
    if offset.length() < chain.total_length() && chain.lies_on_line_to(target) {
        chain.curl(offset.y.atan2(offset.x));
    }
    let segments = &mut chain.segments;
    let Some(last) = segments.last_mut() else {
        return;
    };
    last.reach(target);
    for index in (0..segments.len() - 1).rev() {
        let sub_target = segments[index + 1].position;
        segments[index].reach(sub_target);
    }

    segments[0].position = chain.base;
    for index in 0..segments.len() - 1 {
        segments[index + 1].position = segments[index].end();
    }
}
