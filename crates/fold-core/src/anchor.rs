//! Edit-stable offsets.
//!
//! An [`Anchor`] is a small copyable handle into an [`AnchorTable`]. The table is owned by the
//! [`Document`](crate::Document) and is updated on every edit, so a resolved anchor keeps pointing
//! at the same logical character while text is inserted or removed elsewhere.

/// Handle to a stable offset stored in an [`AnchorTable`].
///
/// Handles are generation-checked: once released, a handle resolves to `None` even if its slot
/// has been reused by a newer anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    slot: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    offset: usize,
    generation: u32,
    live: bool,
}

/// Slab of stable character offsets.
#[derive(Debug, Clone, Default)]
pub struct AnchorTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl AnchorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anchor at `offset`.
    pub fn create(&mut self, offset: usize) -> Anchor {
        self.live += 1;

        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.offset = offset;
            entry.live = true;
            return Anchor {
                slot,
                generation: entry.generation,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            offset,
            generation: 0,
            live: true,
        });
        Anchor {
            slot,
            generation: 0,
        }
    }

    /// Current offset of `anchor`, or `None` if it was released.
    pub fn offset(&self, anchor: Anchor) -> Option<usize> {
        self.slot(anchor).map(|s| s.offset)
    }

    /// Release an anchor. Returns `false` if it was already released.
    pub fn release(&mut self, anchor: Anchor) -> bool {
        let Some(entry) = self.slots.get_mut(anchor.slot as usize) else {
            return false;
        };
        if !entry.live || entry.generation != anchor.generation {
            return false;
        }

        entry.live = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(anchor.slot);
        self.live -= 1;
        true
    }

    /// Number of live anchors.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no anchors are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Release every anchor.
    pub fn clear(&mut self) {
        for (idx, entry) in self.slots.iter_mut().enumerate() {
            if entry.live {
                entry.live = false;
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
        self.live = 0;
    }

    /// Shift anchors for `len` characters inserted at `at`.
    ///
    /// An anchor sitting exactly at `at` moves too: it tracks the character that was there.
    pub fn apply_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for entry in self.slots.iter_mut().filter(|s| s.live) {
            if entry.offset >= at {
                entry.offset += len;
            }
        }
    }

    /// Shift anchors for the character range `[start, start + len)` being deleted.
    ///
    /// Anchors inside the range clamp to `start`.
    pub fn apply_delete(&mut self, start: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = start + len;
        for entry in self.slots.iter_mut().filter(|s| s.live) {
            if entry.offset >= end {
                entry.offset -= len;
            } else if entry.offset > start {
                entry.offset = start;
            }
        }
    }

    fn slot(&self, anchor: Anchor) -> Option<&Slot> {
        self.slots
            .get(anchor.slot as usize)
            .filter(|s| s.live && s.generation == anchor.generation)
    }
}
