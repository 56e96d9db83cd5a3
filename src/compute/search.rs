//! Nearest-neighbor search with split-plane pruning.

use crate::record::{Coord, DIMS, NIL, PointRecord, axis_distance_sq};
use smallvec::SmallVec;

/// Closest stored point to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Slot of the closest record.
    pub slot: u32,
    /// Squared distance to the query.
    pub distance_sq: u128,
    /// Nodes examined during the search.
    pub visited: usize,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    node: u32,
    axis: usize,
    /// Squared distance from the target to the split plane that separates
    /// this subtree from it; zero for the near side.
    bound: u128,
}

/// Find the record closest to `target` in the tree rooted at `root`.
///
/// The near child (the side of the split the target falls on) is always
/// explored first. The far child is explored only while its split-plane
/// distance is below the best squared distance found so far; both are kept in
/// squared units. An exact match ends the search. Returns `None` when
/// `root` is `None`.
pub fn nearest(records: &[PointRecord], root: Option<u32>, target: &Coord) -> Option<Neighbor> {
    let root = root?;
    let mut best: Option<(u32, u128)> = None;
    let mut visited = 0;

    let mut stack: SmallVec<[Pending; 64]> = SmallVec::new();
    stack.push(Pending {
        node: root,
        axis: 0,
        bound: 0,
    });

    while let Some(Pending { node, axis, bound }) = stack.pop() {
        if let Some((_, best_dist)) = best
            && bound >= best_dist
        {
            continue;
        }

        let record = &records[node as usize];
        visited += 1;

        let d = record.coord.distance_sq(target);
        if best.is_none_or(|(_, best_dist)| d < best_dist) {
            best = Some((node, d));
        }
        if d == 0 {
            break;
        }

        let split = record.coord.axis(axis);
        let (near, far) = if target.axis(axis) < split {
            (record.left, record.right)
        } else {
            (record.right, record.left)
        };
        let next = (axis + 1) % DIMS;

        if far != NIL {
            stack.push(Pending {
                node: far,
                axis: next,
                bound: axis_distance_sq(target.axis(axis), split),
            });
        }
        if near != NIL {
            stack.push(Pending {
                node: near,
                axis: next,
                bound: 0,
            });
        }
    }

    best.map(|(slot, distance_sq)| Neighbor {
        slot,
        distance_sq,
        visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::tree::build;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn records_from(values: &[(i64, i64)], labels: Option<&[&str]>) -> Vec<PointRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| {
                let label = match labels {
                    Some(labels) => labels[i].to_string(),
                    None => format!("p{}", i),
                };
                PointRecord::new(Coord::new(a, b), label)
            })
            .collect()
    }

    fn linear_scan(records: &[PointRecord], target: &Coord) -> Option<u128> {
        records.iter().map(|r| r.coord.distance_sq(target)).min()
    }

    #[test]
    fn test_empty_root() {
        let records: Vec<PointRecord> = Vec::new();
        assert_eq!(nearest(&records, None, &Coord::new(0, 0)), None);
    }

    #[test]
    fn test_reference_scenario() {
        let mut records = records_from(
            &[(2, 3), (5, 4), (9, 6), (4, 7), (-8, 1), (7, 2)],
            Some(&["aa", "aa1", "aa2", "aa3", "aa4", "aa5"]),
        );
        let root = build(&mut records, 0);

        let found = nearest(&records, root, &Coord::new(-9, 2)).unwrap();
        assert_eq!(records[found.slot as usize].label.as_ref(), b"aa4");
        assert_eq!(found.distance_sq, 2);
        assert!(found.visited >= 1 && found.visited <= 6);
    }

    #[test]
    fn test_exact_match_stops_early() {
        let values: Vec<_> = (0..1024).map(|i| (i % 32, i / 32)).collect();
        let mut records = records_from(&values, None);
        let root = build(&mut records, 0);

        let root_coord = records[root.unwrap() as usize].coord;
        let found = nearest(&records, root, &root_coord).unwrap();
        assert_eq!(found.distance_sq, 0);
        assert_eq!(found.visited, 1);
    }

    #[test]
    fn test_prunes_far_branches() {
        let values: Vec<_> = (0..4096).map(|i| (i % 64 * 10, i / 64 * 10)).collect();
        let mut records = records_from(&values, None);
        let root = build(&mut records, 0);

        let found = nearest(&records, root, &Coord::new(333, 217)).unwrap();
        assert_eq!(found.distance_sq, linear_scan(&records, &Coord::new(333, 217)).unwrap());
        assert!(found.visited < 200, "visited {} of 4096 nodes", found.visited);
    }

    #[test]
    fn test_matches_linear_scan_random() {
        let mut rng = StdRng::seed_from_u64(7);

        for len in [1usize, 2, 3, 10, 100, 500, 2000] {
            let spread = if len % 2 == 0 { 50 } else { 1_000_000 };
            let values: Vec<_> = (0..len)
                .map(|_| (rng.gen_range(-spread..spread), rng.gen_range(-spread..spread)))
                .collect();
            let mut records = records_from(&values, None);
            let root = build(&mut records, 0);

            for _ in 0..200 {
                let target = Coord::new(
                    rng.gen_range(-2 * spread..2 * spread),
                    rng.gen_range(-2 * spread..2 * spread),
                );
                let found = nearest(&records, root, &target).unwrap();
                let expected = linear_scan(&records, &target).unwrap();

                assert_eq!(found.distance_sq, expected, "len {} target {}", len, target);
                assert_eq!(
                    records[found.slot as usize].coord.distance_sq(&target),
                    found.distance_sq
                );
            }
        }
    }

    #[test]
    fn test_target_on_split_plane() {
        let mut records = records_from(&[(0, 0), (0, 10), (0, -10), (5, 5), (-5, -5)], None);
        let root = build(&mut records, 0);

        for target in [Coord::new(0, 4), Coord::new(0, -6), Coord::new(0, 0)] {
            let found = nearest(&records, root, &target).unwrap();
            assert_eq!(found.distance_sq, linear_scan(&records, &target).unwrap());
        }
    }
}
