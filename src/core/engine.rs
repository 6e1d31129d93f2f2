//! Behavior lifecycle and the fixed-step simulation loop

use std::any::Any;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimConfig;
use crate::core::events::{EventQueue, JumpObservers};
use crate::core::time::Time;
use crate::ecs::{Transform, Velocity, World};
use crate::input::Input;

/// Component logic attached to an entity and driven by the host.
///
/// The lifecycle is:
///
/// 1. `on_enable()` - when attached, and whenever re-enabled
/// 2. `start()` - once, before the first `update()`
/// 3. `update()` - every step while enabled
/// 4. `late_update()` - every step, after all updates and velocity integration
/// 5. `on_disable()` - whenever disabled
///
/// Collision hooks are invoked by the host as contacts begin and end.
pub trait Behavior: Any {
    /// Behavior name for debugging and logging.
    fn name(&self) -> &'static str;

    /// The entity this behavior is attached to.
    fn entity(&self) -> Entity;

    fn start(&mut self, _ctx: &mut SimContext) {}

    fn on_enable(&mut self, _ctx: &mut SimContext) {}

    fn on_disable(&mut self, _ctx: &mut SimContext) {}

    /// Called every step while enabled.
    fn update(&mut self, ctx: &mut SimContext);

    fn late_update(&mut self, _ctx: &mut SimContext) {}

    fn on_collision_enter(&mut self, _ctx: &mut SimContext, _other: Entity) {}

    fn on_collision_exit(&mut self, _ctx: &mut SimContext, _other: Entity) {}
}

/// Shared state passed to every behavior hook
pub struct SimContext {
    /// Time tracking
    pub time: Time,
    /// Input state
    pub input: Input,
    /// ECS world
    pub world: World,
    /// Events pushed this step, readable next step
    pub events: EventQueue,
    /// Host-owned jump notification list
    pub jump_observers: JumpObservers,
    /// Seeded random generator
    pub rng: ChaCha8Rng,
}

impl SimContext {
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            time: Time::with_tick_rate(config.tick_rate),
            input: Input::new(),
            world: World::new(),
            events: EventQueue::new(),
            jump_observers: JumpObservers::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

struct Slot {
    behavior: Box<dyn Behavior>,
    enabled: bool,
    started: bool,
}

/// Fixed-step host that owns the world and runs attached behaviors
pub struct Simulation {
    context: SimContext,
    slots: Vec<Slot>,
}

impl Simulation {
    /// Create an empty simulation
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        log::info!(
            "Starting simulation at {} ticks/s (seed {})",
            config.tick_rate,
            config.seed
        );
        Self {
            context: SimContext::new(config),
            slots: Vec::new(),
        }
    }

    pub fn context(&self) -> &SimContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.context
    }

    /// Attach a behavior. It is enabled immediately.
    pub fn attach(&mut self, behavior: impl Behavior) {
        let mut behavior: Box<dyn Behavior> = Box::new(behavior);
        log::debug!(
            "Attaching {} to {:?}",
            behavior.name(),
            behavior.entity()
        );
        behavior.on_enable(&mut self.context);
        self.slots.push(Slot {
            behavior,
            enabled: true,
            started: false,
        });
    }

    /// Enable or disable every behavior attached to `entity`.
    ///
    /// Returns `false` if nothing is attached to it.
    pub fn set_enabled(&mut self, entity: Entity, enabled: bool) -> bool {
        let mut found = false;
        for slot in self
            .slots
            .iter_mut()
            .filter(|slot| slot.behavior.entity() == entity)
        {
            found = true;
            if slot.enabled == enabled {
                continue;
            }
            slot.enabled = enabled;
            if enabled {
                slot.behavior.on_enable(&mut self.context);
            } else {
                slot.behavior.on_disable(&mut self.context);
            }
        }
        found
    }

    /// Report that `a` and `b` started touching.
    pub fn collision_enter(&mut self, a: Entity, b: Entity) {
        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            let entity = slot.behavior.entity();
            if entity == a {
                slot.behavior.on_collision_enter(&mut self.context, b);
            } else if entity == b {
                slot.behavior.on_collision_enter(&mut self.context, a);
            }
        }
    }

    /// Report that `a` and `b` stopped touching.
    pub fn collision_exit(&mut self, a: Entity, b: Entity) {
        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            let entity = slot.behavior.entity();
            if entity == a {
                slot.behavior.on_collision_exit(&mut self.context, b);
            } else if entity == b {
                slot.behavior.on_collision_exit(&mut self.context, a);
            }
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self) {
        self.context.time.advance();
        self.context.events.swap();

        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            if !slot.started {
                slot.behavior.start(&mut self.context);
                slot.started = true;
            }
        }

        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            slot.behavior.update(&mut self.context);
        }

        self.integrate_velocities();

        for slot in self.slots.iter_mut().filter(|slot| slot.enabled) {
            slot.behavior.late_update(&mut self.context);
        }

        self.context.input.update();
    }

    /// Run `ticks` steps.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
        log::info!(
            "Simulated {} steps ({:.2}s)",
            self.context.time.frame(),
            self.context.time.elapsed()
        );
    }

    /// Find an attached behavior of type `T` on `entity`.
    pub fn behavior<T: Behavior>(&self, entity: Entity) -> Option<&T> {
        self.slots
            .iter()
            .filter(|slot| slot.behavior.entity() == entity)
            .find_map(|slot| {
                let any: &dyn Any = slot.behavior.as_ref();
                any.downcast_ref::<T>()
            })
    }

    /// Find an attached behavior of type `T` on `entity`, mutably.
    pub fn behavior_mut<T: Behavior>(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.behavior.entity() == entity)
            .find_map(|slot| {
                let any: &mut dyn Any = slot.behavior.as_mut();
                any.downcast_mut::<T>()
            })
    }

    fn integrate_velocities(&mut self) {
        let dt = self.context.time.delta();
        for (_, (transform, velocity)) in self
            .context
            .world
            .query_mut::<(&mut Transform, &Velocity)>()
        {
            transform.translate(velocity.linear * dt);
        }
    }
}
