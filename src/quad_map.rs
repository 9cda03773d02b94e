use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    mem,
};

use crate::QuadMapError;

/// Slot count used by [`QuadMap::new`]
const DEFAULT_CAPACITY: usize = 100;
/// Default linear probe parameter, the remainder the original table starts from
const DEFAULT_C: i64 = 1 % 5;
/// Default quadratic probe parameter, the remainder the original table starts from
const DEFAULT_D: i64 = 1 % 7;

/// A key-value pair stored in one slot of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: i32,
}

impl Entry {
    /// Returns the entry's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entry's value
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }
}

/// A fixed-capacity hash table using open addressing with quadratic probing.
///
/// Collisions are resolved by walking the probe sequence
/// `(base + c*i + d*i*i) mod capacity` for attempts `i = 0, 1, 2, ...` until
/// an empty slot turns up. The capacity never changes behind the caller's
/// back: there is no load-factor-triggered growth, only the explicit
/// [`resize`](Self::resize) operation, and a full table reports
/// [`QuadMapError::CapacityExhausted`] instead of growing.
///
/// Each slot holds a small chain of entries rather than a single one. The
/// probing insert path only ever places one entry per slot, but the direct
/// placement done by [`get_or_insert`](Self::get_or_insert) and the
/// single-probe rehash in [`change_hash_function`](Self::change_hash_function)
/// can make two entries share a slot, and the chain keeps both findable.
///
/// Quadratic probing with arbitrary `c`, `d` and capacity is not guaranteed
/// to visit every slot, so an insert can fail with spare capacity left. With
/// the defaults (`c = 1`, `d = 1`) the offsets `i + i*i` are always even, and
/// for even capacities only half the table is reachable from a given base.
/// Sizing the table generously, or prime, is the caller's job.
///
/// Note: this type is not thread-safe; `&mut self` on every mutating
/// operation is the whole synchronization story.
#[derive(Debug, Clone)]
pub struct QuadMap {
    /// The slots storing entry chains, exactly `capacity` of them
    slots: Vec<Vec<Entry>>,
    /// Current number of stored entries, shadow duplicates included
    size: usize,
    /// Linear coefficient of the probe polynomial
    c: i64,
    /// Quadratic coefficient of the probe polynomial
    d: i64,
}

impl Default for QuadMap {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadMap {
    /// Creates an empty table with the default capacity of 100 slots and the
    /// default probe parameters `c = 1`, `d = 1`
    #[must_use]
    pub fn new() -> Self {
        Self { slots: vec![Vec::new(); DEFAULT_CAPACITY], size: 0, c: DEFAULT_C, d: DEFAULT_D }
    }

    /// Creates an empty table with the given number of slots.
    ///
    /// # Errors
    ///
    /// Returns [`QuadMapError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, QuadMapError> {
        if capacity == 0 {
            return Err(QuadMapError::InvalidCapacity(capacity));
        }
        Ok(Self { slots: vec![Vec::new(); capacity], size: 0, c: DEFAULT_C, d: DEFAULT_D })
    }

    /// Computes the base hash for a key
    #[allow(clippy::unused_self)]
    fn base_hash(&self, key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Slot index probed for `key` on the given attempt,
    /// `(base + c*i + d*i*i) mod capacity`
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    #[allow(clippy::arithmetic_side_effects)] // capacity is never zero
    fn probe_index(&self, key: &str, attempt: usize) -> usize {
        let capacity = self.slots.len() as i64;
        let base = (self.base_hash(key) % self.slots.len() as u64) as i64;
        let i = attempt as i64;
        let step = self.c.wrapping_mul(i).wrapping_add(self.d.wrapping_mul(i).wrapping_mul(i));
        base.wrapping_add(step).rem_euclid(capacity) as usize
    }

    /// Walks the probe sequence for `key` and returns the slot and chain
    /// position holding it.
    ///
    /// The walk stops at the first empty slot, on the assumption that an
    /// insert always fills the first empty slot of its sequence, or after
    /// `capacity` attempts.
    fn locate(&self, key: &str) -> Option<(usize, usize)> {
        for attempt in 0..self.slots.len() {
            let index = self.probe_index(key, attempt);
            let chain = self.slots.get(index)?;
            if chain.is_empty() {
                return None;
            }
            if let Some(position) = chain.iter().position(|entry| entry.key == key) {
                return Some((index, position));
            }
        }
        None
    }

    /// Returns the slot index holding `key`, or `None` when the key is absent
    #[must_use]
    pub fn find_slot(&self, key: &str) -> Option<usize> {
        self.locate(key).map(|(slot, _)| slot)
    }

    /// Returns true when the table holds an entry for `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Returns the value stored for `key`, if any
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&i32> {
        let (slot, position) = self.locate(key)?;
        self.slots.get(slot).and_then(|chain| chain.get(position)).map(|entry| &entry.value)
    }

    /// Inserts a key-value pair at the first empty slot of the key's probe
    /// sequence.
    ///
    /// The probe loop looks for an empty slot only, never for the key itself:
    /// inserting a key that is already present stores a second, shadow entry
    /// further down the probe sequence. Lookups keep returning the first
    /// entry in probe order.
    ///
    /// # Errors
    ///
    /// Returns [`QuadMapError::CapacityExhausted`] when `capacity` probe
    /// attempts fail to turn up an empty slot, either because the table is
    /// full or because the quadratic sequence cannot reach the slots that
    /// remain free.
    pub fn insert(&mut self, key: String, value: i32) -> Result<(), QuadMapError> {
        let capacity = self.slots.len();
        for attempt in 0..capacity {
            let index = self.probe_index(&key, attempt);
            match self.slots.get_mut(index) {
                Some(chain) if chain.is_empty() => {
                    chain.push(Entry { key, value });
                    self.size = self.size.saturating_add(1);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(QuadMapError::CapacityExhausted { capacity })
    }

    /// Removes the entry for `key`; does nothing when the key is absent.
    ///
    /// No tombstone is left behind. When the vacated slot was a stepping
    /// stone in another key's probe sequence, lookups for that key now stop
    /// early at the empty slot and miss it. This keeps the original table's
    /// removal behavior; see the regression test for the exact shape of the
    /// gap.
    pub fn remove(&mut self, key: &str) {
        if let Some((slot, position)) = self.locate(key) {
            if let Some(chain) = self.slots.get_mut(slot) {
                if position < chain.len() {
                    chain.remove(position);
                    self.size = self.size.saturating_sub(1);
                }
            }
        }
    }

    /// Returns a mutable borrow of the value for `key`, inserting a zero
    /// value first when the key is absent.
    ///
    /// The insertion path here is the original table's direct placement: the
    /// new entry goes into the attempt-0 slot without probing, joining the
    /// chain of whatever already occupies that slot. The borrow ends with
    /// this call's result; a later [`resize`](Self::resize) or
    /// [`change_hash_function`](Self::change_hash_function) cannot invalidate
    /// it behind the caller's back.
    #[allow(clippy::indexing_slicing)] // locate and probe_index only yield in-bounds positions
    pub fn get_or_insert(&mut self, key: &str) -> &mut i32 {
        let (slot, position) = match self.locate(key) {
            Some(found) => found,
            None => {
                let index = self.probe_index(key, 0);
                self.slots[index].push(Entry { key: key.to_owned(), value: 0 });
                self.size = self.size.saturating_add(1);
                (index, self.slots[index].len().saturating_sub(1))
            }
        };
        &mut self.slots[slot][position].value
    }

    /// Replaces the probe parameters and rebuilds the table under them.
    ///
    /// Every live entry is placed at its attempt-0 slot in a fresh table of
    /// the same capacity; the rebuild does not re-probe on collision, it
    /// pushes coinciding entries onto the same chain. Since attempt 0
    /// contributes `c*0 + d*0*0`, the placement actually depends only on the
    /// base hash, and every entry chained this way stays findable.
    pub fn change_hash_function(&mut self, new_c: i64, new_d: i64) {
        self.c = new_c;
        self.d = new_d;

        let capacity = self.slots.len();
        let old_slots = mem::replace(&mut self.slots, vec![Vec::new(); capacity]);
        for entry in old_slots.into_iter().flatten() {
            let index = self.probe_index(&entry.key, 0);
            if let Some(chain) = self.slots.get_mut(index) {
                chain.push(entry);
            }
        }
    }

    /// Changes the slot count to `new_capacity`.
    ///
    /// Shrinking truncates: slots past the new capacity are dropped along
    /// with their entries. Growing appends empty slots. Neither direction
    /// redistributes the surviving entries, and probe indices always use the
    /// current capacity, so entries placed under the old modulus may stay
    /// unreachable until the next
    /// [`change_hash_function`](Self::change_hash_function) call.
    ///
    /// # Errors
    ///
    /// Returns [`QuadMapError::InvalidCapacity`] when `new_capacity` is zero.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), QuadMapError> {
        if new_capacity == 0 {
            return Err(QuadMapError::InvalidCapacity(new_capacity));
        }
        if new_capacity < self.slots.len() {
            let dropped: usize = self.slots.iter().skip(new_capacity).map(Vec::len).sum();
            self.slots.truncate(new_capacity);
            self.size = self.size.saturating_sub(dropped);
        } else {
            self.slots.resize_with(new_capacity, Vec::new);
        }
        Ok(())
    }

    /// Returns an iterator over `(slot index, entries)` pairs for every
    /// non-empty slot, in increasing slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> SlotIter<'_> {
        SlotIter { slots: &self.slots, index: 0 }
    }

    /// Returns the number of stored entries, shadow duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true when the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current probe parameters `(c, d)`
    #[must_use]
    pub fn probe_params(&self) -> (i64, i64) {
        (self.c, self.d)
    }

    /// Returns the ratio of stored entries to slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }
}

/// Iterator over the non-empty slots of a [`QuadMap`]
#[derive(Debug, Clone)]
pub struct SlotIter<'a> {
    /// Borrowed view of the table's slots
    slots: &'a [Vec<Entry>],
    /// Next slot index to examine
    index: usize,
}

impl<'a> Iterator for SlotIter<'a> {
    type Item = (usize, &'a [Entry]);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let current = self.index;
            self.index = self.index.saturating_add(1);
            if let Some(chain) = self.slots.get(current) {
                if !chain.is_empty() {
                    return Some((current, chain.as_slice()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects `count` distinct keys sharing one attempt-0 slot in `map`
    fn colliding_keys(map: &QuadMap, count: usize) -> Vec<String> {
        let base = map.probe_index("collide-0", 0);
        let mut keys = vec!["collide-0".to_string()];
        let mut n = 1u32;
        while keys.len() < count {
            let candidate = format!("collide-{n}");
            if map.probe_index(&candidate, 0) == base {
                keys.push(candidate);
            }
            n += 1;
        }
        keys
    }

    #[test]
    fn test_insert_and_contains() {
        let mut map = QuadMap::new();
        map.insert("key1".to_string(), 1).unwrap();
        map.insert("key2".to_string(), 2).unwrap();
        map.insert("key3".to_string(), 3).unwrap();

        assert!(map.contains("key1"));
        assert!(map.contains("key2"));
        assert!(map.contains("key3"));
        assert!(!map.contains("key4"));
        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut map = QuadMap::new();
        map.insert("key1".to_string(), 1).unwrap();
        map.insert("key2".to_string(), 2).unwrap();

        map.remove("key1");
        assert!(!map.contains("key1"));
        assert!(map.contains("key2"));
        assert_eq!(map.len(), 1);

        // removing an absent key is a no-op
        map.remove("key1");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_apple_banana_scenario() {
        let mut table = QuadMap::new();
        table.insert("apple".to_string(), 5).unwrap();
        table.insert("banana".to_string(), 10).unwrap();

        assert!(table.contains("apple"));
        *table.get_or_insert("apple") = 7;
        assert_eq!(*table.get_or_insert("apple"), 7);
        assert_eq!(table.get("banana"), Some(&10));
        assert!(!table.contains("cherry"));
    }

    #[test]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn test_quadratic_probe_sequence() {
        let mut map = QuadMap::with_capacity(5).unwrap();
        let keys = colliding_keys(&map, 4);
        let base = map.probe_index(&keys[0], 0);

        for (i, key) in keys.iter().take(3).enumerate() {
            map.insert(key.clone(), i as i32).unwrap();
        }

        // offsets i + i*i for i = 0, 1, 2 are 0, 2 and 6
        assert_eq!(map.find_slot(&keys[0]), Some(base));
        assert_eq!(map.find_slot(&keys[1]), Some((base + 2) % 5));
        assert_eq!(map.find_slot(&keys[2]), Some((base + 6) % 5));
        for (i, key) in keys.iter().take(3).enumerate() {
            assert_eq!(map.get(key), Some(&(i as i32)));
        }

        // (base + i + i*i) mod 5 only ever visits those three slots, so a
        // fourth colliding key exhausts its probe budget with two slots free
        assert_eq!(
            map.insert(keys[3].clone(), 3),
            Err(QuadMapError::CapacityExhausted { capacity: 5 })
        );
    }

    #[test]
    fn test_capacity_exhausted_on_full_table() {
        let mut map = QuadMap::with_capacity(3).unwrap();
        let mut n = 0u32;
        while map.len() < 3 {
            // some candidates fail when their short probe sequence is already
            // taken; keep going until every slot is filled
            let _ = map.insert(format!("fill-{n}"), 0);
            n += 1;
        }
        assert_eq!(
            map.insert("overflow".to_string(), 1),
            Err(QuadMapError::CapacityExhausted { capacity: 3 })
        );
    }

    #[test]
    fn test_invalid_capacity() {
        assert_eq!(QuadMap::with_capacity(0).unwrap_err(), QuadMapError::InvalidCapacity(0));

        let mut map = QuadMap::new();
        assert_eq!(map.resize(0).unwrap_err(), QuadMapError::InvalidCapacity(0));
        assert_eq!(map.capacity(), 100);
    }

    #[test]
    fn test_shadow_duplicate_insert() {
        let mut map = QuadMap::new();
        map.insert("dup".to_string(), 1).unwrap();
        map.insert("dup".to_string(), 2).unwrap();

        // insert never looks for the key, only for an empty slot, so the
        // second insert lands as a shadow entry further down the sequence
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("dup"), Some(&1));

        map.remove("dup");
        assert_eq!(map.len(), 1);
        // the shadow entry is stranded behind the now-empty base slot
        assert_eq!(map.get("dup"), None);
    }

    #[test]
    fn test_remove_probe_chain_gap() {
        let mut map = QuadMap::with_capacity(11).unwrap();
        let keys = colliding_keys(&map, 2);
        map.insert(keys[0].clone(), 1).unwrap();
        map.insert(keys[1].clone(), 2).unwrap();
        assert!(map.contains(&keys[1]));

        map.remove(&keys[0]);

        // no tombstones: the vacated base slot now terminates the second
        // key's probe walk early, even though its entry is still stored
        assert!(!map.contains(&keys[1]));
        let stored: usize = map.iter().map(|(_, chain)| chain.len()).sum();
        assert_eq!(stored, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_or_insert_direct_placement() {
        let mut map = QuadMap::with_capacity(13).unwrap();
        let keys = colliding_keys(&map, 2);
        map.insert(keys[0].clone(), 5).unwrap();

        let value = map.get_or_insert(&keys[1]);
        assert_eq!(*value, 0);
        *value = 9;

        // direct attempt-0 placement shares the occupied base slot's chain
        let base = map.probe_index(&keys[0], 0);
        assert_eq!(map.find_slot(&keys[1]), Some(base));
        assert_eq!(map.get(&keys[0]), Some(&5));
        assert_eq!(map.get(&keys[1]), Some(&9));
        assert_eq!(map.len(), 2);

        let chain_len = map.iter().find(|(slot, _)| *slot == base).map(|(_, chain)| chain.len());
        assert_eq!(chain_len, Some(2));
    }

    #[test]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn test_change_hash_function_preserves_entries() {
        let mut map = QuadMap::new();
        let names = ["alpha", "beta", "gamma", "delta", "epsilon"];
        for (i, name) in names.iter().enumerate() {
            map.insert((*name).to_string(), i as i32).unwrap();
        }

        map.change_hash_function(2, 3);

        assert_eq!(map.probe_params(), (2, 3));
        assert_eq!(map.len(), 5);
        for (i, name) in names.iter().enumerate() {
            assert_eq!(map.get(name), Some(&(i as i32)));
        }
    }

    #[test]
    fn test_change_hash_function_single_probe_placement() {
        let mut map = QuadMap::with_capacity(7).unwrap();
        let keys = colliding_keys(&map, 2);
        let base = map.probe_index(&keys[0], 0);
        map.insert(keys[0].clone(), 1).unwrap();
        map.insert(keys[1].clone(), 2).unwrap();

        map.change_hash_function(3, 5);

        // attempt-0 placement ignores the parameters entirely, so both keys
        // land on the shared base slot's chain and stay findable
        assert_eq!(map.find_slot(&keys[0]), Some(base));
        assert_eq!(map.find_slot(&keys[1]), Some(base));
        assert_eq!(map.get(&keys[0]), Some(&1));
        assert_eq!(map.get(&keys[1]), Some(&2));

        let chain_len = map.iter().find(|(slot, _)| *slot == base).map(|(_, chain)| chain.len());
        assert_eq!(chain_len, Some(2));
    }

    #[test]
    fn test_resize_grow() {
        let probe_small = QuadMap::with_capacity(100).unwrap();
        let probe_large = QuadMap::with_capacity(200).unwrap();

        // split candidate keys by whether the capacity bump moves their base
        let mut stable = None;
        let mut moved = None;
        let mut n = 0u32;
        while stable.is_none() || moved.is_none() {
            let candidate = format!("resize-{n}");
            if probe_small.probe_index(&candidate, 0) == probe_large.probe_index(&candidate, 0) {
                stable.get_or_insert(candidate);
            } else {
                moved.get_or_insert(candidate);
            }
            n += 1;
        }
        let stable = stable.unwrap();
        let moved = moved.unwrap();

        let mut map = QuadMap::with_capacity(100).unwrap();
        map.insert(stable.clone(), 42).unwrap();
        map.insert(moved.clone(), 7).unwrap();
        map.resize(200).unwrap();
        assert_eq!(map.capacity(), 200);

        // slot index unchanged by the new modulus, still reachable
        assert_eq!(map.get(&stable), Some(&42));
        // base slot moved with the modulus; the entry is stored but stays
        // unreachable until the next change_hash_function
        assert!(!map.contains(&moved));
        assert!(map.iter().any(|(_, chain)| chain.iter().any(|entry| entry.key() == moved)));
    }

    #[test]
    fn test_resize_shrink_drops_truncated_slots() {
        let mut map = QuadMap::with_capacity(100).unwrap();
        for i in 0..20 {
            map.insert(format!("key-{i}"), i).unwrap();
        }
        let before = map.len();

        map.resize(10).unwrap();

        assert_eq!(map.capacity(), 10);
        assert!(map.len() <= before);
        // the size counter tracks exactly the surviving entries
        let stored: usize = map.iter().map(|(_, chain)| chain.len()).sum();
        assert_eq!(map.len(), stored);
    }

    #[test]
    fn test_clone_independence() {
        let mut original = QuadMap::new();
        original.insert("a".to_string(), 1).unwrap();

        let mut copy = original.clone();
        copy.insert("b".to_string(), 2).unwrap();
        copy.remove("a");

        assert!(original.contains("a"));
        assert!(!original.contains("b"));
        assert_eq!(original.len(), 1);
        assert!(copy.contains("b"));
        assert!(!copy.contains("a"));
        assert_eq!(copy.probe_params(), original.probe_params());
    }

    #[test]
    fn test_iter_ordered_and_restartable() {
        let mut map = QuadMap::new();
        for i in 0..5 {
            map.insert(format!("it-{i}"), i).unwrap();
        }

        let slots: Vec<usize> = map.iter().map(|(slot, _)| slot).collect();
        let mut sorted = slots.clone();
        sorted.sort_unstable();
        assert_eq!(slots, sorted);

        let total: usize = map.iter().map(|(_, chain)| chain.len()).sum();
        assert_eq!(total, 5);
        assert_eq!(map.iter().count(), map.iter().count());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_len_capacity_and_load_factor() {
        let mut map = QuadMap::with_capacity(10).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 10);
        assert_eq!(map.probe_params(), (1, 1));

        map.insert("one".to_string(), 1).unwrap();
        map.insert("two".to_string(), 2).unwrap();
        assert!(!map.is_empty());
        assert_eq!(map.len(), 2);
        assert!((map.load_factor() - 0.2).abs() < f64::EPSILON);
    }
}
