//! World wrapper around hecs

use glam::Vec3;
use hecs::Entity;

use crate::ai::AgentHost;
use crate::ecs::{Tag, Transform};

/// Game world containing all entities and components
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Despawn an entity
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Query for entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query::<Q>()
    }

    /// Query for entities with specific components (mutable)
    pub fn query_mut<Q: hecs::Query>(&mut self) -> hecs::QueryMut<'_, Q> {
        self.inner.query_mut::<Q>()
    }

    /// Find the first entity carrying the given tag
    pub fn find_tagged(&self, tag: &str) -> Option<Entity> {
        self.inner
            .query::<&Tag>()
            .iter()
            .find(|(_, t)| t.is(tag))
            .map(|(entity, _)| entity)
    }

    /// Check whether an entity carries the given tag
    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.get::<Tag>(entity).is_ok_and(|t| t.is(tag))
    }

    /// World position of an entity with a transform
    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.get::<Transform>(entity).ok().map(|t| t.position)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentHost for World {
    fn position(&self, entity: Entity) -> Option<Vec3> {
        World::position(self, entity)
    }

    fn translate(&mut self, entity: Entity, delta: Vec3) {
        match self.get_mut::<Transform>(entity) {
            Ok(mut transform) => transform.translate(delta),
            Err(e) => log::warn!("Cannot translate {entity:?}: {e}"),
        }
    }

    fn find_tagged(&self, tag: &str) -> Option<Entity> {
        World::find_tagged(self, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Name;

    #[test]
    fn test_find_tagged() {
        let mut world = World::new();
        world.spawn((Transform::default(), Name::new("rock")));
        let player = world.spawn((Transform::default(), Tag::new("Player")));

        assert_eq!(world.find_tagged("Player"), Some(player));
        assert_eq!(world.find_tagged("Ground"), None);
    }

    #[test]
    fn test_has_tag() {
        let mut world = World::new();
        let ground = world.spawn((Tag::new("Ground"),));
        let untagged = world.spawn((Transform::default(),));

        assert!(world.has_tag(ground, "Ground"));
        assert!(!world.has_tag(ground, "Player"));
        assert!(!world.has_tag(untagged, "Ground"));
    }

    #[test]
    fn test_agent_host_translate() {
        let mut world = World::new();
        let entity = world.spawn((Transform::from_position(Vec3::new(1.0, 0.0, 1.0)),));

        AgentHost::translate(&mut world, entity, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(
            AgentHost::position(&world, entity),
            Some(Vec3::new(1.0, 0.0, 3.0))
        );
    }

    #[test]
    fn test_position_of_despawned_entity() {
        let mut world = World::new();
        let entity = world.spawn((Transform::default(),));
        world.despawn(entity).unwrap();

        assert!(world.position(entity).is_none());
    }
}
