//! Named floating-point modifiers ("buffs")
//!
//! Buffs stack additively and are never clamped. Lookups of a missing buff
//! return `0.0`; callers that need a different neutral value (the chase speed
//! multiplier uses `1.0`) go through [`BuffTable::get`] instead.

use rustc_hash::FxHashMap;

/// Buff that scales chase speed.
pub const SPEED: &str = "Speed";
/// Buff seeded with the enemy's starting health.
pub const HEALTH: &str = "Health";

/// Mapping from buff name to magnitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuffTable {
    values: FxHashMap<String, f32>,
}

impl BuffTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the named buff, inserting it if absent.
    pub fn add(&mut self, name: &str, value: f32) {
        match self.values.get_mut(name) {
            Some(current) => *current += value,
            None => {
                self.values.insert(name.to_owned(), value);
            }
        }
    }

    /// Stored magnitude, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Stored magnitude, or `0.0` if absent.
    #[must_use]
    pub fn value(&self, name: &str) -> f32 {
        self.get(name).unwrap_or(0.0)
    }

    /// Remove a buff, returning its magnitude.
    pub fn remove(&mut self, name: &str) -> Option<f32> {
        self.values.remove(name)
    }

    /// Snapshot of the current buff names. Order is unspecified.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for BuffTable {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            let name: String = name.into();
            table.add(&name, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_inserts_then_stacks() {
        let mut buffs = BuffTable::new();
        buffs.add("Shield", 10.0);
        buffs.add("Shield", 5.0);
        assert_eq!(buffs.value("Shield"), 15.0);
    }

    #[test]
    fn test_speed_stacking_is_exact() {
        let mut buffs: BuffTable = [(SPEED, 1.0)].into_iter().collect();
        buffs.add(SPEED, 0.5);
        buffs.add(SPEED, 0.5);
        assert_eq!(buffs.value(SPEED), 2.0);
    }

    #[test]
    fn test_missing_buff_defaults() {
        let buffs = BuffTable::new();
        assert_eq!(buffs.value("Nonexistent"), 0.0);
        assert_eq!(buffs.get("Nonexistent"), None);
    }

    #[test]
    fn test_value_is_idempotent() {
        let buffs: BuffTable = [(SPEED, 1.25)].into_iter().collect();
        let first = buffs.value(SPEED);
        let second = buffs.value(SPEED);
        assert_eq!(first, second);
        assert_eq!(buffs.len(), 1);
    }

    #[test]
    fn test_unbounded_negative_stacking() {
        let mut buffs = BuffTable::new();
        buffs.add("Armor", -3.0);
        buffs.add("Armor", -4.0);
        assert_eq!(buffs.value("Armor"), -7.0);
    }

    #[test]
    fn test_names_is_a_snapshot() {
        let mut buffs: BuffTable = [(SPEED, 1.0), (HEALTH, 100.0)].into_iter().collect();
        let mut names = buffs.names();
        buffs.add("Shield", 1.0);

        names.sort();
        assert_eq!(names, vec![HEALTH.to_owned(), SPEED.to_owned()]);
        assert_eq!(buffs.names().len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut buffs: BuffTable = [(SPEED, 1.0)].into_iter().collect();
        assert_eq!(buffs.remove(SPEED), Some(1.0));
        assert_eq!(buffs.remove(SPEED), None);
        assert!(buffs.is_empty());
    }
}
