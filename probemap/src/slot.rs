/// A stored key/value pair. A deleted entry stays in its slot as a tombstone:
/// the payload is kept but the pair is logically absent.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    deleted: bool,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            key,
            value,
            deleted: false,
        }
    }

    pub(crate) fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

/// `None` is a never-used slot, `Some` holds a live entry or a tombstone.
pub(crate) type Slot<K, V> = Option<Entry<K, V>>;

/// Logical state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Empty,
    Occupied,
    Tombstone,
}

pub(crate) fn status<K, V>(slot: &Slot<K, V>) -> Status {
    match slot {
        None => Status::Empty,
        Some(entry) if entry.is_deleted() => Status::Tombstone,
        Some(_) => Status::Occupied,
    }
}

/// A slot an insert may write into: never used, or a tombstone.
pub(crate) fn is_reusable<K, V>(slot: &Slot<K, V>) -> bool {
    status(slot) != Status::Occupied
}

/// Returns the live entry held by the slot, skipping empty slots and tombstones.
pub(crate) fn live<K, V>(slot: &Slot<K, V>) -> Option<&Entry<K, V>> {
    slot.as_ref().filter(|entry| !entry.is_deleted())
}
