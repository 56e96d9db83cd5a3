//! Point records and fixed-point coordinates.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of dimensions the index splits on.
pub const DIMS: usize = 2;

/// Fixed-point units per degree of latitude or longitude (about 2^32 / 360).
pub const UNITS_PER_DEGREE: i64 = 11_930_464;

/// Node link marker for "no child".
pub const NIL: u32 = u32::MAX;

/// A fixed-point coordinate pair. Axis 0 is latitude, axis 1 is longitude.
///
/// Integer coordinates keep quickselect comparisons exact. Use
/// [`Coord::from_degrees`] or [`Coord::from_geo`] to convert geographic
/// degrees with the canonical [`UNITS_PER_DEGREE`] scale, or [`Coord::new`]
/// when the caller already holds scaled values.
///
/// Distances are flat squared-Euclidean on the raw integers and are not
/// meaningful across the ±180° longitude seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord(pub [i64; DIMS]);

impl Coord {
    pub const fn new(lat: i64, lon: i64) -> Self {
        Self([lat, lon])
    }

    /// Scale degrees to fixed point, truncating toward zero.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self([
            (lat * UNITS_PER_DEGREE as f64) as i64,
            (lon * UNITS_PER_DEGREE as f64) as i64,
        ])
    }

    /// Convert a `geo::Point` (x = longitude, y = latitude).
    pub fn from_geo(point: geo::Point<f64>) -> Self {
        Self::from_degrees(point.y(), point.x())
    }

    pub fn to_degrees(&self) -> (f64, f64) {
        (
            self.0[0] as f64 / UNITS_PER_DEGREE as f64,
            self.0[1] as f64 / UNITS_PER_DEGREE as f64,
        )
    }

    pub fn to_geo(&self) -> geo::Point<f64> {
        let (lat, lon) = self.to_degrees();
        geo::Point::new(lon, lat)
    }

    #[inline]
    pub fn lat(&self) -> i64 {
        self.0[0]
    }

    #[inline]
    pub fn lon(&self) -> i64 {
        self.0[1]
    }

    #[inline]
    pub fn axis(&self, axis: usize) -> i64 {
        self.0[axis]
    }

    /// Squared Euclidean distance over both axes.
    #[inline]
    pub fn distance_sq(&self, other: &Coord) -> u128 {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0u128, |acc, (a, b)| acc.saturating_add(axis_distance_sq(*a, *b)))
    }
}

/// Squared distance along a single axis, in the same units as
/// [`Coord::distance_sq`].
#[inline]
pub fn axis_distance_sq(a: i64, b: i64) -> u128 {
    let d = a.abs_diff(b) as u128;
    d * d
}

impl From<(i64, i64)> for Coord {
    fn from((lat, lon): (i64, i64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<[i64; DIMS]> for Coord {
    fn from(coords: [i64; DIMS]) -> Self {
        Self(coords)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}

/// One slot of the point store. Once a tree is built over the store, each
/// populated slot is a node and `left`/`right` are slot indices or [`NIL`].
#[derive(Debug, Clone)]
pub struct PointRecord {
    pub coord: Coord,
    pub label: Bytes,
    pub(crate) left: u32,
    pub(crate) right: u32,
}

impl PointRecord {
    pub fn new(coord: Coord, label: impl Into<Bytes>) -> Self {
        Self {
            coord,
            label: label.into(),
            left: NIL,
            right: NIL,
        }
    }

    pub fn left(&self) -> Option<u32> {
        (self.left != NIL).then_some(self.left)
    }

    pub fn right(&self) -> Option<u32> {
        (self.right != NIL).then_some(self.right)
    }

    #[inline]
    pub(crate) fn unlink(&mut self) {
        self.left = NIL;
        self.right = NIL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = Coord::new(-9, 2);
        let b = Coord::new(-8, 1);
        assert_eq!(a.distance_sq(&b), 2);
        assert_eq!(b.distance_sq(&a), 2);
        assert_eq!(a.distance_sq(&a), 0);
    }

    #[test]
    fn test_distance_sq_extremes_do_not_overflow() {
        let a = Coord::new(i64::MIN, i64::MIN);
        let b = Coord::new(i64::MAX, i64::MAX);
        let axis = (u64::MAX as u128) * (u64::MAX as u128);
        assert_eq!(axis_distance_sq(i64::MIN, i64::MAX), axis);
        assert_eq!(a.distance_sq(&b), u128::MAX);
    }

    #[test]
    fn test_degree_scaling() {
        let c = Coord::from_degrees(1.0, -2.0);
        assert_eq!(c, Coord::new(UNITS_PER_DEGREE, -2 * UNITS_PER_DEGREE));

        let nyc = Coord::from_degrees(40.7128, -74.0060);
        let (lat, lon) = nyc.to_degrees();
        assert!((lat - 40.7128).abs() < 1e-6);
        assert!((lon + 74.0060).abs() < 1e-6);
    }

    #[test]
    fn test_geo_conversion_axis_order() {
        let point = geo::Point::new(-74.0060, 40.7128);
        let c = Coord::from_geo(point);
        assert_eq!(c, Coord::from_degrees(40.7128, -74.0060));
        assert!(c.lat() > 0);
        assert!(c.lon() < 0);

        let back = c.to_geo();
        assert!((back.x() - point.x()).abs() < 1e-6);
        assert!((back.y() - point.y()).abs() < 1e-6);
    }

    #[test]
    fn test_record_links() {
        let mut record = PointRecord::new(Coord::new(1, 2), "addr");
        assert_eq!(record.left(), None);
        assert_eq!(record.right(), None);

        record.left = 3;
        assert_eq!(record.left(), Some(3));
        record.unlink();
        assert_eq!(record.left(), None);
    }
}
