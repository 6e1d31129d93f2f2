//! Enemy behavior component
//!
//! Drives an enemy agent between [`EnemyState::Patrol`] and
//! [`EnemyState::Chase`] based on its distance to a tracked target, and keeps
//! a [`BuffTable`] whose `"Speed"` entry scales chase velocity.
//!
//! The component never owns transforms. It reads positions and writes
//! translations through [`AgentHost`], which the host world implements.

use std::collections::BTreeMap;

use glam::Vec3;
use hecs::Entity;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::buffs::{self, BuffTable};
use crate::ai::fsm::{EnemyState, StateChange};
use crate::ai::steering::{Heading, Seek, SteeringBehavior, random_planar_direction};
use crate::core::{Behavior, ConfigError, GameEvent, SimContext};

// ============================================================================
// Host Interface
// ============================================================================

/// Operations the enemy needs from the world it lives in.
pub trait AgentHost {
    /// Current world position of an entity, if it exists and has one.
    fn position(&self, entity: Entity) -> Option<Vec3>;

    /// Move an entity by a world-space delta.
    fn translate(&mut self, entity: Entity, delta: Vec3);

    /// Resolve the entity carrying `tag`.
    fn find_tagged(&self, tag: &str) -> Option<Entity>;
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning for an enemy agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Movement speed in units per second
    pub speed: f32,
    /// Distance at which the enemy starts chasing its target
    pub chase_range: f32,
    /// Seconds between patrol direction changes
    pub change_direction_time: f32,
    /// Tag of the entity to chase
    pub target_tag: String,
    /// Buffs present at spawn
    pub initial_buffs: BTreeMap<String, f32>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            chase_range: 5.0,
            change_direction_time: 2.0,
            target_tag: String::from("Player"),
            initial_buffs: BTreeMap::from([
                (buffs::SPEED.to_owned(), 1.0),
                (buffs::HEALTH.to_owned(), 100.0),
            ]),
        }
    }
}

impl EnemyConfig {
    /// Check that every value is inside its domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::invalid("enemy.speed", "must be finite and >= 0"));
        }
        if !self.chase_range.is_finite() || self.chase_range < 0.0 {
            return Err(ConfigError::invalid(
                "enemy.chase_range",
                "must be finite and >= 0",
            ));
        }
        if !self.change_direction_time.is_finite() || self.change_direction_time <= 0.0 {
            return Err(ConfigError::invalid(
                "enemy.change_direction_time",
                "must be finite and > 0",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Enemy Behavior
// ============================================================================

/// Per-agent patrol/chase controller.
#[derive(Debug, Clone)]
pub struct EnemyBehavior {
    agent: Entity,
    config: EnemyConfig,
    state: EnemyState,
    buffs: BuffTable,
    patrol_direction: Vec3,
    direction_timer: f32,
    target: Option<Entity>,
}

impl EnemyBehavior {
    /// Create the behavior without resolving a target.
    ///
    /// The target is resolved when the host calls [`Behavior::start`], or
    /// directly through [`EnemyBehavior::resolve_target`].
    pub fn new<R: Rng + ?Sized>(agent: Entity, config: EnemyConfig, rng: &mut R) -> Self {
        let buffs = config
            .initial_buffs
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();

        Self {
            agent,
            state: EnemyState::Patrol,
            buffs,
            patrol_direction: random_planar_direction(rng),
            direction_timer: 0.0,
            target: None,
            config,
        }
    }

    /// Create the behavior and resolve its target immediately.
    pub fn spawn<H, R>(agent: Entity, config: EnemyConfig, host: &H, rng: &mut R) -> Self
    where
        H: AgentHost + ?Sized,
        R: Rng + ?Sized,
    {
        let mut enemy = Self::new(agent, config, rng);
        enemy.resolve_target(host);
        enemy
    }

    /// Look up the tracked target by tag. Leaves it unset if none exists.
    pub fn resolve_target<H: AgentHost + ?Sized>(&mut self, host: &H) {
        self.target = host.find_tagged(&self.config.target_tag);
        match self.target {
            Some(target) => log::debug!("Enemy {:?} tracking {target:?}", self.agent),
            None => log::debug!(
                "Enemy {:?} found no '{}' to track",
                self.agent,
                self.config.target_tag
            ),
        }
    }

    /// Advance the behavior by one tick.
    ///
    /// Returns the state change, if the transition rule produced one.
    pub fn tick<H, R>(&mut self, host: &mut H, rng: &mut R, dt: f32) -> Option<StateChange>
    where
        H: AgentHost + ?Sized,
        R: Rng + ?Sized,
    {
        let position = host.position(self.agent)?;
        let target_position = self.target.and_then(|target| host.position(target));

        let previous = self.state;
        let distance = target_position.map(|target| position.distance(target));
        self.state = previous.next(distance, self.config.chase_range);

        let change = StateChange::between(previous, self.state);
        if let Some(change) = change {
            log::debug!(
                "Enemy {:?}: {} -> {} (distance {distance:?})",
                self.agent,
                change.from,
                change.to
            );
        }

        let velocity = match self.state {
            EnemyState::Idle => Vec3::ZERO,
            EnemyState::Patrol => self.patrol(rng, dt, position),
            EnemyState::Chase => match target_position {
                Some(target) => self.chase(target, position),
                None => Vec3::ZERO,
            },
        };

        if velocity != Vec3::ZERO {
            host.translate(self.agent, velocity * dt);
        }

        change
    }

    fn patrol<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f32, position: Vec3) -> Vec3 {
        self.direction_timer += dt;

        if self.direction_timer >= self.config.change_direction_time {
            self.patrol_direction = random_planar_direction(rng);
            self.direction_timer = 0.0;
            log::trace!(
                "Enemy {:?} new patrol direction {}",
                self.agent,
                self.patrol_direction
            );
        }

        Heading::new(self.patrol_direction, self.config.speed).calculate(position)
    }

    fn chase(&self, target: Vec3, position: Vec3) -> Vec3 {
        Seek::new(target, self.config.speed * self.speed_multiplier()).calculate(position)
    }

    /// Chase speed multiplier. A missing `"Speed"` buff counts as `1.0`.
    fn speed_multiplier(&self) -> f32 {
        self.buffs.get(buffs::SPEED).unwrap_or(1.0)
    }

    /// Add to a buff, inserting it if absent. Stacks without limit.
    pub fn add_buff(&mut self, name: &str, value: f32) {
        self.buffs.add(name, value);
        log::debug!(
            "Enemy {:?} buff {name} now {}",
            self.agent,
            self.buffs.value(name)
        );
    }

    /// Current magnitude of a buff, or `0.0` if absent.
    #[must_use]
    pub fn buff_value(&self, name: &str) -> f32 {
        self.buffs.value(name)
    }

    /// Snapshot of the current buff names.
    #[must_use]
    pub fn buff_names(&self) -> Vec<String> {
        self.buffs.names()
    }

    /// Remove a buff entirely, returning its magnitude.
    pub fn remove_buff(&mut self, name: &str) -> Option<f32> {
        self.buffs.remove(name)
    }

    /// Force a state. This is the only way into [`EnemyState::Idle`].
    pub fn set_state(&mut self, state: EnemyState) {
        self.state = state;
    }

    #[must_use]
    pub fn state(&self) -> EnemyState {
        self.state
    }

    #[must_use]
    pub fn agent(&self) -> Entity {
        self.agent
    }

    #[must_use]
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    #[must_use]
    pub fn patrol_direction(&self) -> Vec3 {
        self.patrol_direction
    }

    #[must_use]
    pub fn direction_timer(&self) -> f32 {
        self.direction_timer
    }

    #[must_use]
    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }
}

impl Behavior for EnemyBehavior {
    fn name(&self) -> &'static str {
        "EnemyBehavior"
    }

    fn entity(&self) -> Entity {
        self.agent
    }

    fn start(&mut self, ctx: &mut SimContext) {
        self.resolve_target(&ctx.world);
    }

    fn update(&mut self, ctx: &mut SimContext) {
        let dt = ctx.time.delta();
        if let Some(change) = self.tick(&mut ctx.world, &mut ctx.rng, dt) {
            ctx.events.push(GameEvent::EnemyStateChanged {
                entity: self.agent,
                from: change.from,
                to: change.to,
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SimConfig, Simulation};
    use crate::ecs::{Tag, Transform, World};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(enemy_at: Vec3, player_at: Option<Vec3>) -> (World, EnemyBehavior, ChaCha8Rng) {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        if let Some(position) = player_at {
            world.spawn((Transform::from_position(position), Tag::new("Player")));
        }
        let agent = world.spawn((Transform::from_position(enemy_at),));
        let enemy = EnemyBehavior::spawn(agent, EnemyConfig::default(), &world, &mut rng);
        (world, enemy, rng)
    }

    fn move_player(world: &mut World, position: Vec3) {
        let player = world.find_tagged("Player").unwrap();
        world.get_mut::<Transform>(player).unwrap().position = position;
    }

    #[test]
    fn test_spawn_defaults() {
        let (_, enemy, _) = setup(Vec3::ZERO, None);

        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert_eq!(enemy.buff_value("Speed"), 1.0);
        assert_eq!(enemy.buff_value("Health"), 100.0);
        assert_eq!(enemy.direction_timer(), 0.0);
        assert!((enemy.patrol_direction().length() - 1.0).abs() < 1e-5);
        assert!(enemy.target().is_none());
    }

    #[test]
    fn test_config_defaults() {
        let config = EnemyConfig::default();
        assert_eq!(config.speed, 3.5);
        assert_eq!(config.chase_range, 5.0);
        assert_eq!(config.change_direction_time, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_target_resolved_at_spawn() {
        let (world, enemy, _) = setup(Vec3::ZERO, Some(Vec3::X * 20.0));
        assert_eq!(enemy.target(), world.find_tagged("Player"));
    }

    #[test]
    fn test_within_range_enters_chase() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(4.0, 0.0, 0.0)));

        let change = enemy.tick(&mut world, &mut rng, 0.1);

        assert_eq!(enemy.state(), EnemyState::Chase);
        assert_eq!(
            change,
            Some(StateChange {
                from: EnemyState::Patrol,
                to: EnemyState::Chase
            })
        );
    }

    #[test]
    fn test_chase_then_target_leaves_range() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(4.0, 0.0, 0.0)));

        enemy.tick(&mut world, &mut rng, 0.0);
        assert_eq!(enemy.state(), EnemyState::Chase);

        move_player(&mut world, Vec3::new(6.0, 0.0, 0.0));
        enemy.tick(&mut world, &mut rng, 0.0);
        assert_eq!(enemy.state(), EnemyState::Patrol);
    }

    #[test]
    fn test_idle_out_of_range_stays_idle() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(9.0, 0.0, 0.0)));
        enemy.set_state(EnemyState::Idle);
        let agent = enemy.agent();

        let change = enemy.tick(&mut world, &mut rng, 0.5);

        assert!(change.is_none());
        assert_eq!(enemy.state(), EnemyState::Idle);
        assert_eq!(world.position(agent), Some(Vec3::ZERO));
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 3.0)));
        let agent = enemy.agent();

        enemy.tick(&mut world, &mut rng, 0.1);

        let position = world.position(agent).unwrap();
        assert!((position - Vec3::new(0.0, 0.0, 0.35)).length() < 1e-5);
    }

    #[test]
    fn test_chase_scaled_by_speed_buff() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(3.0, 0.0, 0.0)));
        enemy.add_buff("Speed", 1.0);
        let agent = enemy.agent();

        enemy.tick(&mut world, &mut rng, 0.1);

        let position = world.position(agent).unwrap();
        assert!((position.x - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_chase_without_speed_buff_uses_neutral_multiplier() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(3.0, 0.0, 0.0)));
        enemy.remove_buff("Speed");
        assert_eq!(enemy.buff_value("Speed"), 0.0);
        let agent = enemy.agent();

        enemy.tick(&mut world, &mut rng, 0.1);

        let position = world.position(agent).unwrap();
        assert!((position.x - 3.5 * 1.0 * 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_forced_chase_without_target_does_not_move() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ONE, None);
        enemy.set_state(EnemyState::Chase);
        let agent = enemy.agent();

        enemy.tick(&mut world, &mut rng, 1.0);

        assert_eq!(enemy.state(), EnemyState::Chase);
        assert_eq!(world.position(agent), Some(Vec3::ONE));
    }

    #[test]
    fn test_missing_target_patrols() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, None);
        let agent = enemy.agent();
        let direction = enemy.patrol_direction();

        for _ in 0..3 {
            assert!(enemy.tick(&mut world, &mut rng, 0.25).is_none());
        }

        assert_eq!(enemy.state(), EnemyState::Patrol);
        let expected = direction * 3.5 * 0.75;
        assert!((world.position(agent).unwrap() - expected).length() < 1e-4);
    }

    #[test]
    fn test_patrol_direction_resampled_on_interval() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, None);
        let initial = enemy.patrol_direction();

        for _ in 0..3 {
            enemy.tick(&mut world, &mut rng, 0.5);
        }
        assert_eq!(enemy.patrol_direction(), initial);
        assert_eq!(enemy.direction_timer(), 1.5);

        enemy.tick(&mut world, &mut rng, 0.5);
        assert_ne!(enemy.patrol_direction(), initial);
        assert_eq!(enemy.direction_timer(), 0.0);
    }

    #[test]
    fn test_despawned_target_is_not_read() {
        let (mut world, mut enemy, mut rng) = setup(Vec3::ZERO, Some(Vec3::new(2.0, 0.0, 0.0)));
        enemy.tick(&mut world, &mut rng, 0.0);
        assert_eq!(enemy.state(), EnemyState::Chase);

        let player = enemy.target().unwrap();
        world.despawn(player).unwrap();
        let agent = enemy.agent();
        let before = world.position(agent);

        assert!(enemy.tick(&mut world, &mut rng, 0.5).is_none());
        assert_eq!(world.position(agent), before);
    }

    #[test]
    fn test_buff_api() {
        let (_, mut enemy, _) = setup(Vec3::ZERO, None);

        enemy.add_buff("Speed", 0.5);
        enemy.add_buff("Speed", 0.5);
        assert_eq!(enemy.buff_value("Speed"), 2.0);

        enemy.add_buff("Shield", 10.0);
        enemy.add_buff("Shield", 5.0);
        assert_eq!(enemy.buff_value("Shield"), 15.0);

        assert_eq!(enemy.buff_value("Nonexistent"), 0.0);

        let mut names = enemy.buff_names();
        names.sort();
        assert_eq!(names, vec!["Health", "Shield", "Speed"]);
    }

    #[test]
    fn test_simulation_resolves_target_and_reports_chase() {
        let mut sim = Simulation::new(&SimConfig::default());
        let ctx = sim.context_mut();
        ctx.world.spawn((
            Transform::from_position(Vec3::new(3.0, 0.0, 0.0)),
            Tag::new("Player"),
        ));
        let agent = ctx.world.spawn((Transform::default(),));
        let enemy = EnemyBehavior::new(agent, EnemyConfig::default(), &mut ctx.rng);
        assert!(enemy.target().is_none());
        sim.attach(enemy);

        sim.step();
        sim.step();

        let enemy = sim.behavior::<EnemyBehavior>(agent).unwrap();
        assert!(enemy.target().is_some());
        assert_eq!(enemy.state(), EnemyState::Chase);
        assert!(sim.context().events.iter().any(|event| matches!(
            event,
            GameEvent::EnemyStateChanged {
                entity,
                from: EnemyState::Patrol,
                to: EnemyState::Chase,
            } if *entity == agent
        )));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EnemyConfig {
            change_direction_time: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EnemyConfig {
            speed: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
