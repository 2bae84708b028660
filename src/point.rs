use crate::error::KdError;
use std::ops::Index;

/// An immutable point in k-dimensional space.
///
/// Equality is exact and coordinate-wise: two points are equal only if they have
/// the same number of coordinates and every coordinate compares equal with `==`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coords: Vec<f64>,
}

/// Builds a [`Point`] from its coordinates, e.g. `point![1.0, 2.0]`.
#[macro_export]
macro_rules! point {
    ($($coord:expr),+ $(,)?) => {
        $crate::Point::new(vec![$($coord as f64),+])
    };
}

impl Point {
    /// Stores the coordinates verbatim; the dimension is `coords.len()`.
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Number of coordinates.
    #[inline]
    pub fn k(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// `false` immediately if the dimensions differ, otherwise exact coordinate-wise equality.
    pub fn equals(&self, other: &Point) -> bool {
        self == other
    }

    /// Euclidean distance to `other`, NaN if the dimensions differ.
    pub fn distance(&self, other: &Point) -> f64 {
        self.sqr_distance(other).sqrt()
    }

    /// Sum of squared per-axis differences, NaN if the dimensions differ.
    ///
    /// Only use where relative ordering matters, it skips the square root.
    #[inline]
    pub fn sqr_distance(&self, other: &Point) -> f64 {
        if self.k() != other.k() {
            return f64::NAN;
        }
        self.coords
            .iter()
            .zip(&other.coords)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl Index<usize> for Point {
    type Output = f64;

    #[inline]
    fn index(&self, axis: usize) -> &f64 {
        &self.coords[axis]
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Self::new(coords.to_vec())
    }
}

/// Euclidean distance between two optional points, `+infinity` if either is absent.
pub fn distance(a: Option<&Point>, b: Option<&Point>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.distance(b),
        _ => f64::INFINITY,
    }
}

/// Squared Euclidean distance between two optional points, `+infinity` if either is absent.
pub fn sqr_distance(a: Option<&Point>, b: Option<&Point>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.sqr_distance(b),
        _ => f64::INFINITY,
    }
}

/// Splits an interleaved coordinate buffer into points.
///
/// # Arguments
/// * `flat` - A flat array of coordinates `[x, y, x, y, ...]` for `k = 2`.
/// * `k` - The number of coordinates per point.
pub fn points_from_flat(flat: &[f64], k: usize) -> Result<Vec<Point>, KdError> {
    if k == 0 {
        return Err(KdError::ZeroDimension);
    }
    let remainder = flat.len() % k;
    if remainder != 0 {
        return Err(KdError::DimensionMismatch {
            expected: k,
            found: remainder,
        });
    }
    Ok(flat.chunks_exact(k).map(Point::from).collect())
}
