//! In-place median selection (quickselect) on one axis.

use crate::record::PointRecord;

/// Reorder `records` in place so that the element at `records.len() / 2`
/// holds the median value on `axis`, with every element before it `<=` and
/// every element after it `>=` that value. Returns that position, or `None`
/// for an empty slice.
///
/// Each round takes the midpoint of the remaining window as pivot and splits
/// the window three ways (less, equal, greater) using swaps only. The search
/// stops as soon as the middle index falls inside the equal band, so runs of
/// duplicate values end the loop instead of narrowing forever. Expected
/// linear time; adversarial input can degrade to quadratic.
pub fn find_median(records: &mut [PointRecord], axis: usize) -> Option<usize> {
    let len = records.len();
    match len {
        0 => return None,
        1 => return Some(0),
        _ => {}
    }

    let target = len / 2;
    let (mut start, mut end) = (0, len);

    loop {
        let pivot = records[start + (end - start) / 2].coord.axis(axis);
        let (lt, gt) = partition3(&mut records[start..end], axis, pivot);
        let (lt, gt) = (start + lt, start + gt);

        if target < lt {
            end = lt;
        } else if target >= gt {
            start = gt;
        } else {
            return Some(target);
        }
    }
}

/// Dutch-flag partition around `pivot`. Returns `(lt, gt)` such that
/// `[..lt]` is below the pivot, `[lt..gt]` equals it and `[gt..]` is above.
/// The pivot must be present in `records`, so the equal band is never empty.
fn partition3(records: &mut [PointRecord], axis: usize, pivot: i64) -> (usize, usize) {
    let (mut lt, mut i, mut gt) = (0, 0, records.len());

    while i < gt {
        let value = records[i].coord.axis(axis);
        if value < pivot {
            records.swap(i, lt);
            lt += 1;
            i += 1;
        } else if value > pivot {
            gt -= 1;
            records.swap(i, gt);
        } else {
            i += 1;
        }
    }

    (lt, gt)
}
