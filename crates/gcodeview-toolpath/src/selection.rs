//! Selection ring
//!
//! A fixed-capacity, insertion-ordered multiset of segment indices. Adding to
//! a full ring overwrites the oldest entry. Removal shifts every newer entry
//! one slot toward the vacated one, so the occupied slots always form one
//! contiguous run, oldest first, that ends just before the write cursor.
//!
//! Not synchronized; callers sharing a ring across threads must lock it.

use gcodeview_core::constants::SELECTION_CAPACITY;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRing {
    /// `None` marks an empty slot
    slots: Vec<Option<usize>>,
    cursor: usize,
}

impl Default for SelectionRing {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionRing {
    /// Empty ring with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(SELECTION_CAPACITY)
    }

    /// Empty ring with `capacity` slots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Write `index` at the cursor, overwriting the oldest entry when full.
    ///
    /// Indices already present are added again as a separate entry.
    pub fn add(&mut self, index: usize) {
        if let Some(evicted) = self.slots[self.cursor].replace(index) {
            trace!("Selection ring full, evicted {}", evicted);
        }
        self.cursor = (self.cursor + 1) % self.capacity();
    }

    /// Remove the first occurrence of `index` in slot order. No-op if absent.
    pub fn remove(&mut self, index: usize) {
        let Some(pos) = self.index_of(index) else {
            return;
        };

        // Shift the newer part of the run toward `pos`; it ends at the cursor
        let cap = self.capacity();
        let mut j = pos;
        loop {
            let from = (j + 1) % cap;
            if from == self.cursor || self.slots[from].is_none() {
                break;
            }
            self.slots[j] = self.slots[from];
            j = from;
        }

        self.slots[j] = None;
        self.cursor = j;
    }

    /// Membership test
    pub fn find(&self, index: usize) -> bool {
        self.slots.contains(&Some(index))
    }

    /// Slot position of the first occurrence of `index`
    pub fn index_of(&self, index: usize) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == Some(index))
    }

    /// Remove and return the most recently added entry
    pub fn pop(&mut self) -> Option<usize> {
        let cap = self.capacity();
        let newest = (self.cursor + cap - 1) % cap;
        let value = self.slots[newest].take()?;
        self.cursor = newest;
        Some(value)
    }

    /// Add `index` if absent, otherwise remove it
    pub fn toggle(&mut self, index: usize) {
        if self.find(index) {
            self.remove(index);
        } else {
            self.add(index);
        }
    }

    /// Empty every slot and rewind the cursor
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.cursor = 0;
    }

    /// Occupied entries as `(slot, index)` in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| value.map(|v| (slot, v)))
    }

    /// Occupied entries as `(slot, index)`, oldest first
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cap = self.capacity();
        let start = self.oldest_slot();
        (0..cap)
            .map(move |k| (start + k) % cap)
            .filter_map(move |slot| self.slots[slot].map(|v| (slot, v)))
    }

    /// Slot of the oldest entry: the cursor when full, otherwise the first
    /// occupied slot after the free gap.
    fn oldest_slot(&self) -> usize {
        let cap = self.capacity();
        if self.is_full() {
            return self.cursor;
        }
        (0..cap)
            .map(|k| (self.cursor + k) % cap)
            .find(|&k| self.slots[k].is_some())
            .unwrap_or(0)
    }

    /// Raw slot view, `None` for empty slots
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// Rewrite every occupied slot in place.
    ///
    /// `map` returning `None` empties the slot; the remaining entries are
    /// then compacted so they stay in order.
    pub fn replace_all<F>(&mut self, mut map: F)
    where
        F: FnMut(usize) -> Option<usize>,
    {
        let cap = self.capacity();
        let start = self.oldest_slot();

        let ordered: Vec<usize> = (0..cap)
            .filter_map(|k| self.slots[(start + k) % cap])
            .filter_map(&mut map)
            .collect();

        if ordered.len() == self.count() {
            // Nothing dropped: keep slot positions stable
            let mut values = ordered.into_iter();
            for k in 0..cap {
                let slot = &mut self.slots[(start + k) % cap];
                if slot.is_some() {
                    *slot = values.next();
                }
            }
            return;
        }

        self.slots.fill(None);
        for (k, value) in ordered.iter().enumerate() {
            self.slots[(start + k) % cap] = Some(*value);
        }
        self.cursor = (start + ordered.len()) % cap;
    }
}
