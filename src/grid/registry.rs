//! Key/door registry
//!
//! Keys are kept in declaration order so that serialization reproduces the
//! header exactly. Lookups are linear; a map rarely declares more than a
//! handful of keys.

use super::Coord;

/// A relation the registry accepts but that a strict reader should reject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryConflict {
    /// The same door is listed under two different keys
    DuplicateDoor {
        door: Coord,
        first: Coord,
        second: Coord,
    },
    /// A key coordinate is also listed as a door (of any key)
    KeyIsDoor { key: Coord },
}

/// Insertion-ordered mapping from key coordinate to the doors it unlocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorRegistry {
    entries: Vec<(Coord, Vec<Coord>)>,
}

impl DoorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `doors` under `key`.
    ///
    /// Redeclaring a key replaces its door list in place and returns the old
    /// list; the key keeps its original position.
    pub fn insert(&mut self, key: Coord, doors: Vec<Coord>) -> Option<Vec<Coord>> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, doors)),
            None => {
                self.entries.push((key, doors));
                None
            }
        }
    }

    /// Doors unlocked by `key`, in declaration order
    pub fn doors_of(&self, key: Coord) -> Option<&[Coord]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, doors)| doors.as_slice())
    }

    pub fn contains_key(&self, coord: Coord) -> bool {
        self.entries.iter().any(|(k, _)| *k == coord)
    }

    pub fn contains_door(&self, coord: Coord) -> bool {
        self.entries.iter().any(|(_, doors)| doors.contains(&coord))
    }

    /// First key, in declaration order, whose door list contains `door`
    pub fn find_key(&self, door: Coord) -> Option<Coord> {
        self.entries
            .iter()
            .find(|(_, doors)| doors.contains(&door))
            .map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &[Coord])> + '_ {
        self.entries.iter().map(|(k, doors)| (*k, doors.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = Coord> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relations that violate door uniqueness or key/door disjointness.
    ///
    /// Reported in declaration order: each key is checked against the keys
    /// declared before it.
    pub fn conflicts(&self) -> Vec<RegistryConflict> {
        let mut conflicts = Vec::new();
        for (index, (key, doors)) in self.entries.iter().enumerate() {
            if self.contains_door(*key) {
                conflicts.push(RegistryConflict::KeyIsDoor { key: *key });
            }
            for door in doors {
                let earlier = self.entries[..index]
                    .iter()
                    .find(|(_, other)| other.contains(door));
                if let Some((first, _)) = earlier {
                    conflicts.push(RegistryConflict::DuplicateDoor {
                        door: *door,
                        first: *first,
                        second: *key,
                    });
                }
            }
        }
        conflicts
    }
}
