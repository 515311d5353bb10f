use std::iter::FusedIterator;

use crate::slot::{self, Slot};

/// Iterator over the live key-value pairs of a `ProbingTable`, in slot order
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    current_index: usize,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(slots: &'a [Slot<K, V>], len: usize) -> Self {
        Self {
            slots,
            current_index: 0,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Skip empty slots and tombstones
        while self.current_index < self.slots.len() {
            let current = &self.slots[self.current_index];
            self.current_index += 1;
            if let Some(entry) = slot::live(current) {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            current_index: self.current_index,
            remaining: self.remaining,
        }
    }
}
