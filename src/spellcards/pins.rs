//! Pinned entries.
//!
//! A pin belongs to an entry, not to one of its cards: every page of a pinned
//! entry stays visible. Pins live for one session and are never written out.

use crate::model::EntryId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSet {
    pinned: BTreeSet<EntryId>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the pin of `id`, returning whether it is now pinned.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.pinned.remove(id) {
            false
        } else {
            self.pinned.insert(id.to_string());
            true
        }
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pinned.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_membership() {
        let mut pins = PinSet::new();
        assert!(pins.toggle("fireball"));
        assert!(pins.is_pinned("fireball"));
        assert!(!pins.toggle("fireball"));
        assert!(pins.is_empty());
    }

    #[test]
    fn test_iterates_in_id_order() {
        let mut pins = PinSet::new();
        pins.toggle("shield");
        pins.toggle("heal");
        assert_eq!(pins.iter().collect::<Vec<_>>(), vec!["heal", "shield"]);
        assert_eq!(pins.len(), 2);
    }
}
