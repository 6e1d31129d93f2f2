//! Player stat block and movement modifiers

use serde::{Deserialize, Serialize};

use crate::ecs::Velocity;

/// Base combat stats for a player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub health: f32,
    pub damage: f32,
    pub defense: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            damage: 25.0,
            defense: 10.0,
        }
    }
}

/// One-shot multiplier applied to a body's current velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBoost {
    pub multiplier: f32,
}

impl SpeedBoost {
    #[must_use]
    pub fn new(multiplier: f32) -> Self {
        Self { multiplier }
    }

    /// Scale the velocity in place
    pub fn apply(&self, velocity: &mut Velocity) {
        velocity.linear *= self.multiplier;
        log::info!("Speed boost applied!");
    }
}

impl Default for SpeedBoost {
    fn default() -> Self {
        Self::new(1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_speed_boost_scales_velocity() {
        let mut velocity = Velocity::new(Vec3::new(2.0, -4.0, 0.0));
        SpeedBoost::default().apply(&mut velocity);
        assert_eq!(velocity.linear, Vec3::new(3.0, -6.0, 0.0));
    }

    #[test]
    fn test_stats_defaults() {
        let stats = PlayerStats::default();
        assert_eq!(stats.health, 100.0);
        assert_eq!(stats.damage, 25.0);
        assert_eq!(stats.defense, 10.0);
    }
}
