//! Fixed-capacity point storage.
//!
//! The store is a single contiguous buffer allocated once at its configured
//! capacity. Rebuilds overwrite the populated prefix in place and truncate
//! the rest, so the buffer never reallocates and labels of replaced or
//! dropped slots are released as they go.

use crate::record::{Coord, PointRecord};
use bytes::Bytes;

/// Outcome of repopulating the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Records now held by the store.
    pub count: usize,
    /// The input had more points than the store could hold.
    pub truncated: bool,
}

/// Owned copy of one stored record, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSnapshot {
    pub slot: usize,
    pub coord: Coord,
    pub label: Bytes,
}

pub struct PointStore {
    records: Vec<PointRecord>,
    capacity: usize,
}

impl PointStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [PointRecord] {
        &mut self.records
    }

    /// Replace the store contents with `points` in input order, keeping at
    /// most `capacity` of them.
    ///
    /// At most `capacity + 1` items are pulled from the iterator; the extra
    /// one only tells whether the input was truncated. If the iterator or a
    /// label conversion panics, the store is left empty.
    pub fn fill<I, L>(&mut self, points: I) -> FillOutcome
    where
        I: IntoIterator<Item = (Coord, L)>,
        L: Into<Bytes>,
    {
        let mut points = points.into_iter();
        let mut guard = ClearOnUnwind {
            records: &mut self.records,
            armed: true,
        };
        let mut count = 0;

        for (coord, label) in points.by_ref().take(self.capacity) {
            if let Some(slot) = guard.records.get_mut(count) {
                slot.coord = coord;
                slot.label = label.into();
                slot.unlink();
            } else {
                guard.records.push(PointRecord::new(coord, label));
            }
            count += 1;
        }

        guard.records.truncate(count);
        let truncated = points.next().is_some();
        guard.armed = false;

        FillOutcome { count, truncated }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Copy out slots `from..=to`, clamped to the populated range.
    pub fn snapshot(&self, from: usize, to: usize) -> Vec<RecordSnapshot> {
        let Some(last) = self.records.len().checked_sub(1) else {
            return Vec::new();
        };
        let (from, to) = (from.min(last), to.min(last));
        if from > to {
            return Vec::new();
        }

        self.records[from..=to]
            .iter()
            .enumerate()
            .map(|(offset, record)| RecordSnapshot {
                slot: from + offset,
                coord: record.coord,
                label: record.label.clone(),
            })
            .collect()
    }
}

/// Empties the records unless disarmed, so a fill interrupted by a panic
/// never leaves old and new points mixed.
struct ClearOnUnwind<'a> {
    records: &'a mut Vec<PointRecord>,
    armed: bool,
}

impl Drop for ClearOnUnwind<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.records.clear();
        }
    }
}
