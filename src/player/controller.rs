//! Side-scrolling player controller
//!
//! Reads the horizontal axis and the jump/fire actions each step, writes the
//! player's [`Velocity`], spawns projectiles, and keeps the player inside a
//! horizontal band. Ground contact is learned only from collision hooks
//! against entities carrying the ground tag.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::core::{Behavior, ConfigError, GameEvent, SimContext};
use crate::ecs::{Name, Projectile, Transform, Velocity};
use crate::input::{InputAction, InputMapper};

/// Tuning for the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal movement speed
    pub move_speed: f32,
    /// Vertical speed set when jumping
    pub jump_force: f32,
    /// Allowed `[min, max]` range for the x coordinate
    pub bounds_x: [f32; 2],
    /// Projectile spawn offset, mirrored on X when facing left
    pub fire_offset: Vec3,
    /// Projectile speed along the facing direction
    pub projectile_speed: f32,
    /// Tag identifying ground colliders
    pub ground_tag: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            bounds_x: [-10.0, 10.0],
            fire_offset: Vec3::new(0.5, 0.0, 0.0),
            projectile_speed: 12.0,
            ground_tag: String::from("Ground"),
        }
    }
}

impl PlayerConfig {
    /// Check that every value is inside its domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(ConfigError::invalid(
                "player.move_speed",
                "must be finite and >= 0",
            ));
        }
        if !self.jump_force.is_finite() || self.jump_force < 0.0 {
            return Err(ConfigError::invalid(
                "player.jump_force",
                "must be finite and >= 0",
            ));
        }
        let [min, max] = self.bounds_x;
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ConfigError::invalid("player.bounds_x", "min must be <= max"));
        }
        if !self.fire_offset.is_finite() {
            return Err(ConfigError::invalid("player.fire_offset", "must be finite"));
        }
        if !self.projectile_speed.is_finite() || self.projectile_speed < 0.0 {
            return Err(ConfigError::invalid(
                "player.projectile_speed",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Player movement, jumping and firing
#[derive(Debug, Clone)]
pub struct PlayerController {
    entity: Entity,
    config: PlayerConfig,
    mapper: InputMapper,
    grounded: bool,
    facing: f32,
}

impl PlayerController {
    pub fn new(entity: Entity, config: PlayerConfig) -> Self {
        Self::with_mapper(entity, config, InputMapper::with_defaults())
    }

    pub fn with_mapper(entity: Entity, config: PlayerConfig, mapper: InputMapper) -> Self {
        Self {
            entity,
            config,
            mapper,
            grounded: false,
            facing: 1.0,
        }
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// `1.0` when facing +X, `-1.0` when facing -X
    #[must_use]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    fn fire(&self, ctx: &mut SimContext) {
        let Ok(origin) = ctx.world.get::<Transform>(self.entity).map(|t| *t) else {
            log::warn!("Player {:?} has no transform; cannot fire", self.entity);
            return;
        };

        let offset = self.config.fire_offset * Vec3::new(self.facing, 1.0, 1.0);
        let position = origin.position + offset;
        let projectile = ctx.world.spawn((
            Transform::from_position_rotation(position, origin.rotation),
            Velocity::new(Vec3::X * self.facing * self.config.projectile_speed),
            Projectile { owner: self.entity },
            Name::new("Projectile"),
        ));

        log::info!("Projectile fired!");
        ctx.events.push(GameEvent::ProjectileFired {
            owner: self.entity,
            projectile,
            position,
        });
    }
}

impl Behavior for PlayerController {
    fn name(&self) -> &'static str {
        "PlayerController"
    }

    fn entity(&self) -> Entity {
        self.entity
    }

    fn on_enable(&mut self, _ctx: &mut SimContext) {
        log::info!("PlayerController enabled");
    }

    fn on_disable(&mut self, _ctx: &mut SimContext) {
        log::info!("PlayerController disabled");
    }

    fn update(&mut self, ctx: &mut SimContext) {
        let axis = self
            .mapper
            .axis(&ctx.input, InputAction::MoveLeft, InputAction::MoveRight);
        if axis != 0.0 {
            self.facing = axis.signum();
        }
        let jumped =
            self.grounded && self.mapper.is_action_just_pressed(&ctx.input, InputAction::Jump);

        {
            let Ok(mut velocity) = ctx.world.get_mut::<Velocity>(self.entity) else {
                log::warn!("Player {:?} has no velocity; skipping movement", self.entity);
                return;
            };
            velocity.linear.x = axis * self.config.move_speed;
            if jumped {
                velocity.linear.y = self.config.jump_force;
            }
        }

        if jumped {
            log::info!("Player jumped!");
            ctx.events.push(GameEvent::PlayerJumped {
                entity: self.entity,
            });
            ctx.jump_observers.notify(self.entity);
        }

        if self.mapper.is_action_just_pressed(&ctx.input, InputAction::Fire) {
            self.fire(ctx);
        }
    }

    fn late_update(&mut self, ctx: &mut SimContext) {
        let [min, max] = self.config.bounds_x;
        if let Ok(mut transform) = ctx.world.get_mut::<Transform>(self.entity) {
            transform.position.x = transform.position.x.clamp(min, max);
        }
    }

    fn on_collision_enter(&mut self, ctx: &mut SimContext, other: Entity) {
        if ctx.world.has_tag(other, &self.config.ground_tag) {
            self.grounded = true;
            log::info!("Player is grounded.");
            ctx.events.push(GameEvent::Grounded {
                entity: self.entity,
            });
        }
    }

    fn on_collision_exit(&mut self, ctx: &mut SimContext, other: Entity) {
        if ctx.world.has_tag(other, &self.config.ground_tag) {
            self.grounded = false;
            log::info!("Player left the ground.");
            ctx.events.push(GameEvent::LeftGround {
                entity: self.entity,
            });
        }
    }
}
