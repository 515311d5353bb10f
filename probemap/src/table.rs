use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use log::{debug, trace};
use rustc_hash::FxBuildHasher;

use crate::error::{ProbeError, Result};
use crate::iter::Iter;
use crate::slot::{self, Entry, Slot, Status};

/// Number of slots a table starts with
pub const DEFAULT_CAPACITY: usize = 3;

/// Capacity multiplier applied on every rehash
pub const GROWTH_FACTOR: usize = 2;

/// Where a forward scan from a key's home index ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// First empty or tombstoned slot on the probe path
    Vacant(usize),
    /// A live entry with the same key already sits here
    Duplicate(usize),
    /// Every slot holds a live entry
    Full,
}

enum InsertResult<K, V> {
    Placed,
    Duplicate,
    Rehash(Entry<K, V>),
}

/// An open addressing hash table with linear probing and lazy deletion.
///
/// Deleting a key leaves a tombstone behind so probe chains running through
/// the slot stay intact; later inserts may reuse it. The table only grows:
/// when an insert walks the whole array without finding a reusable slot the
/// capacity is doubled and the live entries are rebuilt into a fresh array.
///
/// Inserting a key that is already live is rejected rather than treated as
/// an update.
pub struct ProbingTable<K, V, S = FxBuildHasher> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    hasher: S,
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| None).collect()
}

impl<K, V> ProbingTable<K, V, FxBuildHasher> {
    /// Creates an empty table with `DEFAULT_CAPACITY` slots
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher)
    }

    /// Creates an empty table with `capacity` slots, which must be non-zero
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S: Default> Default for ProbingTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ProbingTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            len: 0,
            tombstones: 0,
            hasher,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            return Err(ProbeError::InvalidArgument("capacity must be greater than zero"));
        }

        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
            tombstones: 0,
            hasher,
        })
    }

    /// Returns the number of live key-value pairs in the table
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing array
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots holding a deleted entry
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the fraction of slots that are not empty, tombstones included
    pub fn load_factor(&self) -> f64 {
        (self.len + self.tombstones) as f64 / self.capacity() as f64
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Iterates over live entries in slot order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Home index of `key`: its hash modulo the current capacity
    pub fn hash_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        // u64 remainder is never negative
        (self.hasher.hash_one(key) % self.capacity() as u64) as usize
    }

    /// Scans forward from the home index for `key`, stopping at the first
    /// empty slot. Tombstones holding other keys are stepped over; the first
    /// slot whose key matches is returned whether or not it is deleted.
    fn find_slot<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let capacity = self.capacity();
        let home = self.hash_index(key);

        for step in 0..capacity {
            let index = (home + step) % capacity;
            match &self.slots[index] {
                None => return None,
                Some(entry) if entry.key.borrow() == key => return Some(index),
                Some(_) => {}
            }
        }

        None
    }

    /// Linear probing for a slot to write `key` into. The first reusable slot
    /// wins, but the scan carries on to the end of the chain so a live copy of
    /// the key further along is still reported.
    fn find_placement(slots: &[Slot<K, V>], home: usize, key: &K) -> Placement {
        let capacity = slots.len();
        let mut reusable = None;

        for step in 0..capacity {
            let index = (home + step) % capacity;
            let current = &slots[index];
            if current.is_none() {
                return Placement::Vacant(reusable.unwrap_or(index));
            }
            match slot::live(current) {
                Some(entry) if entry.key == *key => return Placement::Duplicate(index),
                Some(_) => {}
                None => {
                    reusable.get_or_insert(index);
                }
            }
        }

        reusable.map_or(Placement::Full, Placement::Vacant)
    }

    fn try_place(&mut self, entry: Entry<K, V>) -> InsertResult<K, V> {
        let home = self.hash_index(&entry.key);

        match Self::find_placement(&self.slots, home, &entry.key) {
            Placement::Vacant(index) => {
                debug_assert!(slot::is_reusable(&self.slots[index]));
                if slot::status(&self.slots[index]) == Status::Tombstone {
                    self.tombstones -= 1;
                }
                self.slots[index] = Some(entry);
                self.len += 1;
                trace!("placed entry at slot {index} (home {home})");
                InsertResult::Placed
            }
            Placement::Duplicate(index) => {
                trace!("rejected duplicate key live at slot {index}");
                InsertResult::Duplicate
            }
            Placement::Full => InsertResult::Rehash(entry),
        }
    }

    /// Inserts a new key-value pair.
    ///
    /// Returns `false` without touching the stored value if `key` is already
    /// live. When no slot is free the table is rehashed into twice the
    /// capacity and the insert is retried once.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.try_place(Entry::new(key, value)) {
            InsertResult::Placed => true,
            InsertResult::Duplicate => false,
            InsertResult::Rehash(entry) => {
                self.rehash();
                match self.try_place(entry) {
                    InsertResult::Placed => true,
                    InsertResult::Duplicate => false,
                    InsertResult::Rehash(_) => unreachable!(
                        "no free slot after rehashing to capacity {}",
                        self.capacity()
                    ),
                }
            }
        }
    }

    /// Returns a reference to the value stored for `key`, if it is live
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.find_slot(key)?;
        slot::live(&self.slots[index]).map(|entry| &entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Marks the entry for `key` as deleted, leaving it in place as a
    /// tombstone. Returns `false` if there was no live entry.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(index) = self.find_slot(key) else {
            return false;
        };

        match self.slots[index].as_mut() {
            Some(entry) if !entry.is_deleted() => {
                entry.mark_deleted();
                self.len -= 1;
                self.tombstones += 1;
                true
            }
            _ => false,
        }
    }

    /// Rebuilds the table into a fresh array of `GROWTH_FACTOR` times the
    /// capacity. Live entries are reinserted in old slot order; empty slots
    /// and tombstones are dropped.
    fn rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        let dropped = self.tombstones;
        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_capacity));

        for entry in old_slots.into_iter().flatten() {
            if entry.is_deleted() {
                continue;
            }
            let home = self.hash_index(&entry.key);
            match Self::find_placement(&self.slots, home, &entry.key) {
                Placement::Vacant(index) => self.slots[index] = Some(entry),
                placement => unreachable!(
                    "rehash into capacity {new_capacity} produced {placement:?}"
                ),
            }
        }
        self.tombstones = 0;

        debug!(
            "rehashed {} live entries from capacity {old_capacity} to {new_capacity}, dropped {dropped} tombstones",
            self.len
        );
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Renders live entries one `key=value` per line, in slot order
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for ProbingTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, value) in self.iter() {
            writeln!(f, "{key}={value}")?;
        }
        write!(f, "}}")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ProbingTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Duplicate keys are rejected as with `insert`: the first value wins.
impl<K, V, S> Extend<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}
