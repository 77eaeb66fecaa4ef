/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies point-set utilities for distances, random sampling, grids, and duplicate detection.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use faer::{Mat, RowRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use faer::mat;
/// use ferreus_rbf_dense::get_distance;
///
/// let points = mat![
///     [1.0, 2.0],
///     [4.0, 6.0],
/// ];
///
/// let target = points.row(0);
/// let source = points.row(1);
///
/// let dist = get_distance(target, source);
///
/// assert_eq!(dist, 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist.sqrt()
}

/// Generate a matrix of random points in the unit hypercube.
///
/// # Parameters
/// - `n`: Number of points to generate (rows in the output matrix).
/// - `d`: Number of spatial dimensions per point (columns in the output matrix).
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same sequence of points will be generated
///     deterministically across runs and platforms (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Returns
/// A `Mat<f64>` of shape `(n, d)` where each element lies in `[0.0, 1.0)`.
///
/// # Example
/// ```
/// use ferreus_rbf_dense::generate_random_points;
///
/// // Generate 100 reproducible 3D points
/// let pts = generate_random_points(100, 3, Some(42));
/// assert_eq!(pts.ncols(), 3);
/// ```
pub fn generate_random_points(n: usize, d: usize, seed: Option<u64>) -> Mat<f64> {
    let mut rng = match seed.is_some() {
        true => StdRng::seed_from_u64(seed.unwrap()),
        false => StdRng::from_os_rng(),
    };

    let source_points = Mat::from_fn(n, d, |_, _| rng.random_range(0.0..1.0));

    source_points
}

/// Create a regular evaluation grid from per-dimension ranges and sample counts.
///
/// # Arguments
/// * `ranges` - Inclusive `(min, max)` range for each dimension.
/// * `counts` - Number of grid samples per range; must match `ranges.len()`.
///
/// # Returns
/// A `Mat<f64>` with one row per grid point and one column per dimension.
pub fn create_evaluation_grid(ranges: &[(f64, f64)], counts: &[usize]) -> Mat<f64> {
    assert_eq!(ranges.len(), counts.len());

    let dimensions = counts.to_vec();
    let total_points: usize = dimensions.iter().product();
    let num_dimensions = ranges.len();

    Mat::from_fn(total_points, num_dimensions, |row_idx, col_idx| {
        let dim_points = dimensions[col_idx];
        let (start, end) = ranges[col_idx];
        let step = (end - start) / (dim_points as f64 - 1.0);

        let stride = match col_idx == 0 {
            true => 1,
            false => dimensions[..col_idx].iter().product::<usize>(),
        };

        let index_in_dim = (row_idx / stride) % dim_points;
        start + step * index_in_dim as f64
    })
}

/// Finds the first pair of coincident rows in a point matrix, if any.
///
/// Coincident (duplicate) points make the RBF kernel matrix rank deficient,
/// so this is the usual culprit when a solve reports a singular system.
/// The scan is a plain `O(n^2)` pass over all unordered pairs and returns the
/// lowest-index pair `(i, j)` with `i < j` at zero distance.
pub fn find_coincident_points(points: &Mat<f64>) -> Option<(usize, usize)> {
    let n = points.nrows();

    for i in 0..n {
        for j in (i + 1)..n {
            if get_distance(points.row(i), points.row(j)) < f64::EPSILON {
                return Some((i, j));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    #[test]
    fn distance_is_euclidean() {
        let points = mat![
            [0.0, 0.0, 0.0],
            [3.0, 4.0, 0.0],
        ];

        assert!(get_distance(points.row(0), points.row(1)) == 5.0);
        assert!(get_distance(points.row(0), points.row(0)) == 0.0);
    }

    #[test]
    fn seeded_points_are_reproducible() {
        let a = generate_random_points(25, 3, Some(7));
        let b = generate_random_points(25, 3, Some(7));

        assert!(a.nrows() == 25);
        assert!(a.ncols() == 3);
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert!(a[(i, j)] == b[(i, j)]);
            }
        }
        assert!(a.col_iter().all(|col| col.iter().all(|v| (0.0..1.0).contains(v))));
    }

    #[test]
    fn grid_covers_ranges_with_expected_strides() {
        let grid = create_evaluation_grid(&[(0.0, 1.0), (-1.0, 1.0)], &[3, 2]);

        assert!(grid.nrows() == 6);
        assert!(grid.ncols() == 2);

        // First dimension varies fastest.
        assert!(grid[(0, 0)] == 0.0);
        assert!(grid[(1, 0)] == 0.5);
        assert!(grid[(2, 0)] == 1.0);
        assert!(grid[(3, 0)] == 0.0);

        // Second dimension steps once the first wraps.
        assert!(grid[(0, 1)] == -1.0);
        assert!(grid[(3, 1)] == 1.0);
        assert!(grid[(5, 1)] == 1.0);
    }

    #[test]
    fn coincident_scan_reports_first_pair() {
        let points = mat![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ];

        assert!(find_coincident_points(&points) == Some((0, 3)));
    }

    #[test]
    fn coincident_scan_passes_distinct_points() {
        let points = generate_random_points(50, 2, Some(42));

        assert!(find_coincident_points(&points) == None);
    }
}
