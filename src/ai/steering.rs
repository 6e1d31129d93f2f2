//! Steering helpers for enemy movement
//!
//! Behaviors produce a desired velocity; the caller scales it by the tick
//! length and applies it as a translation.

use glam::Vec3;
use rand::Rng;

/// Squared length below which a sampled heading is rejected as degenerate.
const MIN_HEADING_LENGTH_SQ: f32 = 1e-4;

/// Trait for steering behaviors
pub trait SteeringBehavior {
    /// Desired velocity for an agent at `position`
    fn calculate(&self, position: Vec3) -> Vec3;
}

/// Seek behavior - move towards target at constant speed
#[derive(Debug, Clone)]
pub struct Seek {
    /// Target position
    pub target: Vec3,
    /// Speed along the direction to the target
    pub speed: f32,
}

impl Seek {
    /// Create a new seek behavior
    #[must_use]
    pub fn new(target: Vec3, speed: f32) -> Self {
        Self { target, speed }
    }
}

impl SteeringBehavior for Seek {
    fn calculate(&self, position: Vec3) -> Vec3 {
        (self.target - position).normalize_or_zero() * self.speed
    }
}

/// Heading behavior - move along a fixed direction
#[derive(Debug, Clone)]
pub struct Heading {
    /// Unit direction of travel
    pub direction: Vec3,
    /// Speed along the direction
    pub speed: f32,
}

impl Heading {
    /// Create a new heading behavior
    #[must_use]
    pub fn new(direction: Vec3, speed: f32) -> Self {
        Self { direction, speed }
    }
}

impl SteeringBehavior for Heading {
    fn calculate(&self, _position: Vec3) -> Vec3 {
        self.direction * self.speed
    }
}

/// Sample a unit direction on the XZ plane.
///
/// Components are drawn uniformly from `[-1, 1]`; near-zero samples are
/// rejected and redrawn.
pub fn random_planar_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(rng.gen_range(-1.0..=1.0), 0.0, rng.gen_range(-1.0..=1.0));
        if candidate.length_squared() > MIN_HEADING_LENGTH_SQ {
            return candidate.normalize();
        }
    }
}
