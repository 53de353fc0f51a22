//! Stacking order arbiter.
//!
//! A single counter owned by the board session. Load assigns consecutive
//! indices so the earliest-created note sits at the back; every
//! `bring_to_front` takes the next counter value, so values are never reused
//! and the most recently raised note is always on top.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use crate::consts::Z_BASE;
use crate::note::{NoteDoc, NoteKey};

#[derive(Debug, Clone, Copy)]
pub struct ZOrder {
    base: i64,
    counter: i64,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::new(Z_BASE)
    }
}

impl ZOrder {
    #[must_use]
    pub fn new(base: i64) -> Self {
        Self { base, counter: base }
    }

    /// Upper bound of every index handed out so far.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.counter
    }

    /// Renumber every note in the doc from `base`, back to front.
    ///
    /// Order is the persisted z-index when present, then `created_at`, then
    /// server id, so relative order survives a reload while gaps collapse.
    /// The counter ends at `base + len` or the highest persisted index,
    /// whichever is larger, so every later raise lands above anything stored.
    pub fn assign_load_order(&mut self, doc: &mut NoteDoc) {
        let mut order: Vec<_> = doc
            .sorted()
            .into_iter()
            .map(|v| (v.z_index, v.created_at, v.id, v.key))
            .collect();
        order.sort();
        let persisted_max = order.last().map_or(self.base, |(z, ..)| *z);

        let mut next = self.base;
        for (_, _, _, key) in order {
            doc.set_z_index(key, next);
            next += 1;
        }
        self.counter = next.max(persisted_max);
    }

    /// Raise `key` above every other note. Returns the assigned z-index, or
    /// `None` (without consuming a value) if the note is unknown.
    pub fn bring_to_front(&mut self, doc: &mut NoteDoc, key: NoteKey) -> Option<i64> {
        doc.get(key)?;
        self.counter += 1;
        doc.set_z_index(key, self.counter);
        Some(self.counter)
    }
}
