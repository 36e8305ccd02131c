//! Point sets on the unit interval
//!
//! A [`PointSet`] is an ordered sequence of coordinates in [0, 1). Insertion
//! order is generation order: best-candidate samplers choose each point
//! knowing all earlier ones, so the order is kept as produced.

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};

/// Distance between two coordinates on the unit circle
///
/// The interval wraps at its boundary, so 0.05 and 0.95 are 0.1 apart.
/// The result always lies in [0, 0.5] for inputs in [0, 1).
pub fn toroidal_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs();
    d.min(1.0 - d)
}

/// Ordered set of coordinates in [0, 1)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<f32>,
}

impl PointSet {
    /// Build a point set, rejecting coordinates outside [0, 1)
    pub fn new(points: Vec<f32>) -> Result<Self> {
        if let Some((index, &value)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..1.0).contains(*p))
        {
            return Err(NoiseError::PointOutOfRange { index, value });
        }
        Ok(Self { points })
    }

    /// Empty point set with room for `capacity` points
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point produced by a sampler
    pub(crate) fn push(&mut self, point: f32) {
        debug_assert!((0.0..1.0).contains(&point));
        self.points.push(point);
    }

    /// Points in generation order
    pub fn as_slice(&self) -> &[f32] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().copied()
    }

    /// Ascending copy of the coordinates, as used for point dumps
    pub fn sorted(&self) -> Vec<f32> {
        let mut sorted = self.points.clone();
        sorted.sort_by(f32::total_cmp);
        sorted
    }

    /// Smallest toroidal distance from `candidate` to any point, `None` if empty
    pub fn nearest_distance(&self, candidate: f32) -> Option<f32> {
        self.iter()
            .map(|p| toroidal_distance(candidate, p))
            .reduce(f32::min)
    }

    /// Largest toroidal distance from `candidate` to any point, `None` if empty
    pub fn farthest_distance(&self, candidate: f32) -> Option<f32> {
        self.iter()
            .map(|p| toroidal_distance(candidate, p))
            .reduce(f32::max)
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.points
    }
}

impl AsRef<[f32]> for PointSet {
    fn as_ref(&self) -> &[f32] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toroidal_distance_wraps() {
        assert!((toroidal_distance(0.05, 0.95) - 0.1).abs() < 1e-6);
        assert!((toroidal_distance(0.2, 0.4) - 0.2).abs() < 1e-6);
        assert_eq!(toroidal_distance(0.0, 0.5), 0.5);
        assert_eq!(toroidal_distance(0.3, 0.3), 0.0);
    }

    #[test]
    fn test_point_set_rejects_out_of_range() {
        assert!(PointSet::new(vec![0.0, 0.5, 0.999]).is_ok());

        let err = PointSet::new(vec![0.1, 1.0]).unwrap_err();
        assert!(matches!(err, NoiseError::PointOutOfRange { index: 1, .. }));

        assert!(PointSet::new(vec![-0.1]).is_err());
        assert!(PointSet::new(vec![f32::NAN]).is_err());
    }

    #[test]
    fn test_sorted_keeps_generation_order() {
        let set = PointSet::new(vec![0.75, 0.0, 0.25]).unwrap();
        assert_eq!(set.sorted(), vec![0.0, 0.25, 0.75]);
        assert_eq!(set.as_slice(), &[0.75, 0.0, 0.25]);
    }

    #[test]
    fn test_nearest_and_farthest() {
        let set = PointSet::new(vec![0.0, 0.25]).unwrap();
        assert!((set.nearest_distance(0.9).unwrap() - 0.1).abs() < 1e-6);
        assert!((set.farthest_distance(0.9).unwrap() - 0.35).abs() < 1e-6);

        let empty = PointSet::default();
        assert!(empty.nearest_distance(0.5).is_none());
        assert!(empty.farthest_distance(0.5).is_none());
    }

    proptest! {
        #[test]
        fn test_toroidal_distance_symmetric(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            prop_assert_eq!(toroidal_distance(a, b), toroidal_distance(b, a));
        }

        #[test]
        fn test_toroidal_distance_bounded(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let d = toroidal_distance(a, b);
            prop_assert!((0.0..=0.5).contains(&d), "distance {} out of [0, 0.5]", d);
        }
    }
}
