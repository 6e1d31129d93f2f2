//! Gameplay Events and Observers
//!
//! Two channels connect behaviors to the rest of the game:
//!
//! - [`EventQueue`]: a double-buffered queue of [`GameEvent`]s. Events pushed
//!   during frame N become readable during frame N+1, so consumers never see a
//!   half-written frame.
//! - [`JumpObservers`]: a host-owned callback list notified immediately when a
//!   player jumps. Controllers only trigger it; they never store it.
//!
//! # Example
//!
//! ```ignore
//! ctx.jump_observers.subscribe(|player| log::info!("{player:?} jumped"));
//!
//! // Next frame
//! for event in ctx.events.iter() {
//!     if let GameEvent::EnemyStateChanged { to: EnemyState::Chase, .. } = event {
//!         play_alert();
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::fmt;

use glam::Vec3;
use hecs::Entity;
use smallvec::SmallVec;

use crate::ai::EnemyState;

// ============================================================================
// Event Types
// ============================================================================

/// Things that happened during a simulation step.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GameEvent {
    // -------------------------------------------------------------------------
    // Enemy Events
    // -------------------------------------------------------------------------
    /// An enemy switched behavior state.
    EnemyStateChanged {
        /// The enemy agent
        entity: Entity,
        /// Previous state
        from: EnemyState,
        /// New state
        to: EnemyState,
    },

    // -------------------------------------------------------------------------
    // Player Events
    // -------------------------------------------------------------------------
    /// The player left the ground by jumping.
    PlayerJumped {
        /// The player entity
        entity: Entity,
    },

    /// The player fired a projectile.
    ProjectileFired {
        /// The player entity
        owner: Entity,
        /// The spawned projectile
        projectile: Entity,
        /// Spawn position
        position: Vec3,
    },

    /// The player touched ground.
    Grounded {
        /// The player entity
        entity: Entity,
    },

    /// The player lost ground contact.
    LeftGround {
        /// The player entity
        entity: Entity,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for frame-consistent event processing.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<GameEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 32;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Push an event to be processed next frame.
    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Make this frame's events readable and start a fresh pending buffer.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous frame.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.processing.iter()
    }

    /// Drain all events from the previous frame.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.processing.drain(..)
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clear all events (both pending and processing).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processing.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Jump Observers
// ============================================================================

/// Identifier returned by [`JumpObservers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

type JumpCallback = Box<dyn FnMut(Entity)>;

/// Callbacks run whenever a player jumps.
#[derive(Default)]
pub struct JumpObservers {
    listeners: SmallVec<[(ObserverId, JumpCallback); 4]>,
    next_id: u32,
}

impl JumpObservers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    pub fn subscribe(&mut self, callback: impl FnMut(Entity) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Invoke every callback with the jumping entity.
    pub fn notify(&mut self, entity: Entity) {
        for (_, callback) in &mut self.listeners {
            callback(entity);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for JumpObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JumpObservers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
