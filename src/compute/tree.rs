//! Balanced k-d tree construction over the point store.
//!
//! The tree lives inside the store: every slot of the built range becomes a
//! node whose `left`/`right` fields index other slots. Building is a
//! median split per range, alternating the axis by depth, driven by an
//! explicit work-stack so large inputs cannot exhaust the call stack.

use super::partition::find_median;
use crate::record::{DIMS, NIL, PointRecord};
use smallvec::SmallVec;

/// Where a freshly placed node gets attached.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(u32),
    Right(u32),
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    start: usize,
    end: usize,
    axis: usize,
    link: Link,
}

/// Build a tree over all of `records`, splitting first on `axis`.
/// Returns the root slot, or `None` for an empty slice.
///
/// `records.len()` must fit below [`NIL`]; the index configuration
/// enforces this through its capacity bound.
pub fn build(records: &mut [PointRecord], axis: usize) -> Option<u32> {
    debug_assert!(records.len() < NIL as usize);

    let mut root = None;
    let mut stack: SmallVec<[Frame; 64]> = SmallVec::new();
    stack.push(Frame {
        start: 0,
        end: records.len(),
        axis: axis % DIMS,
        link: Link::Root,
    });

    while let Some(frame) = stack.pop() {
        if frame.start == frame.end {
            continue;
        }

        let Some(offset) = find_median(&mut records[frame.start..frame.end], frame.axis) else {
            unreachable!("non-empty range has a median");
        };
        let node = frame.start + offset;
        let id = node as u32;
        records[node].unlink();

        match frame.link {
            Link::Root => root = Some(id),
            Link::Left(parent) => records[parent as usize].left = id,
            Link::Right(parent) => records[parent as usize].right = id,
        }

        let next = (frame.axis + 1) % DIMS;
        stack.push(Frame {
            start: node + 1,
            end: frame.end,
            axis: next,
            link: Link::Right(id),
        });
        stack.push(Frame {
            start: frame.start,
            end: node,
            axis: next,
            link: Link::Left(id),
        });
    }

    root
}
