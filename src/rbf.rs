/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the main RBF interpolator, weight management, and solver orchestration logic.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    common,
    interpolant_config::{is_strictly_positive_definite, Regularization},
    kernels::{RadialKernel, RbfKernel},
    linalg::{self, FactorizationError, GramSolver},
    progress::{ProgressMsg, ProgressSink},
};

use faer::{Mat, RowRef};
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{self, Debug},
    sync::Arc,
    time::Instant,
};

/// Errors reported by [`RBFInterpolator`] operations.
///
/// Each variant corresponds to a specific misuse of the fitting sequence or
/// to a kernel system the dense solver cannot invert.
#[derive(Debug)]
pub enum RbfError {
    /// `set_data` was called with no points or with zero-dimensional points.
    EmptyPointSet,

    /// The value matrix does not provide exactly one value per point.
    DimensionMismatch {
        num_points: usize,
        num_values: usize,
    },

    /// `calc_weights` was called before any data was loaded.
    DataNotSet,

    /// An evaluation was requested before `calc_weights` succeeded.
    WeightsNotComputed,

    /// A query point does not have the same dimensionality as the data points.
    QueryDimensionMismatch { expected: usize, found: usize },

    /// The kernel matrix is numerically singular and no weights were produced.
    ///
    /// When the point set contains an exactly coincident pair, its indices are
    /// reported so the caller can deduplicate the input.
    SingularSystem {
        rank: usize,
        size: usize,
        coincident_points: Option<(usize, usize)>,
    },
}

impl fmt::Display for RbfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RbfError::EmptyPointSet => {
                write!(f, "the point set is empty")
            }
            RbfError::DimensionMismatch {
                num_points,
                num_values,
            } => write!(
                f,
                "expected one value per point but got {} values for {} points",
                num_values, num_points
            ),
            RbfError::DataNotSet => {
                write!(f, "no data has been set; call set_data before calc_weights")
            }
            RbfError::WeightsNotComputed => {
                write!(
                    f,
                    "weights have not been computed; call calc_weights before evaluating"
                )
            }
            RbfError::QueryDimensionMismatch { expected, found } => write!(
                f,
                "query points have {} dimensions but the interpolator was fitted in {} dimensions",
                found, expected
            ),
            RbfError::SingularSystem {
                rank,
                size,
                coincident_points,
            } => match coincident_points {
                Some((i, j)) => write!(
                    f,
                    "kernel matrix is singular (numerical rank {} of {}): points {} and {} \
                     are coincident; remove duplicates or apply ridge regularization",
                    rank, size, i, j
                ),
                None => write!(
                    f,
                    "kernel matrix is singular (numerical rank {} of {}); \
                     consider ridge regularization",
                    rank, size
                ),
            },
        }
    }
}

impl Error for RbfError {}

/// Convenience builder for constructing an [`RBFInterpolator`].
///
/// This builder provides an ergonomic way to configure an interpolator
/// before any data is loaded. Supplies sensible defaults and allows
/// incremental configuration.
///
/// The builder should be called via the [`RBFInterpolator::builder`] method.
///
/// See [`RBFInterpolator`] for details on each field.
pub struct RBFInterpolatorBuilder {
    kernel: Arc<RbfKernel>,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl RBFInterpolatorBuilder {
    /// Creates a new builder with the default thin plate spline kernel and
    /// no progress callback.
    fn new() -> Self {
        Self {
            kernel: Arc::new(RbfKernel::default()),
            progress_callback: None,
        }
    }

    /// Sets the radial basis kernel used for fitting and evaluation.
    pub fn kernel(mut self, kernel: RbfKernel) -> Self {
        self.kernel = Arc::new(kernel);
        self
    }

    /// Sets a kernel that is shared with other interpolator instances.
    ///
    /// Useful when several interpolators are fitted against the same
    /// configured kernel.
    pub fn shared_kernel(mut self, kernel: Arc<RbfKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    /// Optional callback for reporting solver progress.
    ///
    /// Skipped during serialization.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Builds and returns the configured [`RBFInterpolator`].
    pub fn build(self) -> RBFInterpolator {
        RBFInterpolator::new(self.kernel, self.progress_callback)
    }
}

/// Dense radial basis function interpolator.
///
/// Fits an interpolant of the form `f(x) = sum_i w_i * phi(||x - x_i||)` to
/// scattered data by factorising the full kernel matrix. Usage follows a
/// three step sequence:
///
/// 1. [`RBFInterpolator::set_data`] loads the points and their values.
/// 2. [`RBFInterpolator::calc_weights`] assembles and solves the kernel system.
/// 3. [`RBFInterpolator::calc_value`] / [`RBFInterpolator::evaluate`] query the
///    fitted interpolant.
///
/// Loading new data invalidates previously computed weights, and evaluating
/// before a successful solve returns [`RbfError::WeightsNotComputed`].
///
/// ### Example
/// ```
/// use faer::mat;
/// use ferreus_rbf_dense::interpolant_config::Regularization;
/// use ferreus_rbf_dense::RBFInterpolator;
///
/// let mut rbfi = RBFInterpolator::builder().build();
///
/// rbfi.set_data(mat![[0.0], [0.7], [2.0]], mat![[0.5], [2.0], [0.5]])?;
/// rbfi.calc_weights(Regularization::None)?;
///
/// let queries = mat![[0.7]];
/// let value = rbfi.calc_value(queries.row(0))?;
/// assert!((value - 2.0).abs() < 1e-8);
/// # Ok::<(), ferreus_rbf_dense::RbfError>(())
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct RBFInterpolator {
    /// Coordinates of the input data points.
    ///
    /// Only [`RBFInterpolator::set_data`] may replace these, so weights can
    /// never outlive the data they were solved against.
    points: Mat<f64>,

    /// Scalar values at each input point.
    point_values: Mat<f64>,

    /// Solved weights for the radial basis terms.
    ///
    /// `None` until [`RBFInterpolator::calc_weights`] succeeds.
    weights: Option<Mat<f64>>,

    /// Kernel used to assemble and evaluate the system.
    kernel: Arc<RbfKernel>,

    /// Optional callback for reporting solver progress.
    /// Skipped during serialization.
    #[serde(skip, default)]
    pub(crate) progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl RBFInterpolator {
    /// Creates a new [`RBFInterpolatorBuilder`].
    ///
    /// This is the way to construct an interpolator.
    pub fn builder() -> RBFInterpolatorBuilder {
        RBFInterpolatorBuilder::new()
    }

    fn new(kernel: Arc<RbfKernel>, progress_callback: Option<Arc<dyn ProgressSink>>) -> Self {
        Self {
            points: Mat::<f64>::new(),
            point_values: Mat::<f64>::new(),
            weights: None,
            kernel,
            progress_callback,
        }
    }

    /// Loads the interpolation data.
    ///
    /// `points` holds one point per row and `point_values` the corresponding
    /// scalar values as an `(n x 1)` matrix. Any previously computed weights
    /// are discarded.
    ///
    /// ### Errors
    /// - [`RbfError::EmptyPointSet`] when `points` has no rows or no columns.
    /// - [`RbfError::DimensionMismatch`] when `point_values` is not a single
    ///   column with one entry per point.
    ///
    /// The interpolator is left unchanged when an error is returned.
    pub fn set_data(&mut self, points: Mat<f64>, point_values: Mat<f64>) -> Result<(), RbfError> {
        if points.nrows() == 0 || points.ncols() == 0 {
            return Err(RbfError::EmptyPointSet);
        }

        if point_values.nrows() != points.nrows() || point_values.ncols() != 1 {
            return Err(RbfError::DimensionMismatch {
                num_points: points.nrows(),
                num_values: point_values.nrows() * point_values.ncols(),
            });
        }

        self.points = points;
        self.point_values = point_values;
        self.weights = None;

        Ok(())
    }

    /// Assembles the kernel matrix and solves for the interpolation weights.
    ///
    /// With [`Regularization::Ridge`] the diagonal of the kernel matrix is
    /// shifted by `lambda`, trading exact reproduction of the data for a
    /// smoother, better conditioned fit.
    ///
    /// Strictly positive definite kernels are solved with a Cholesky
    /// factorisation. Kernels without that guarantee, and positive definite
    /// systems whose factorisation fails numerically, are rank checked and
    /// solved with partial pivoting LU.
    ///
    /// ### Errors
    /// - [`RbfError::DataNotSet`] when called before [`RBFInterpolator::set_data`].
    /// - [`RbfError::SingularSystem`] when the kernel matrix is numerically
    ///   rank deficient.
    ///
    /// Weights from any earlier solve are discarded even when an error is
    /// returned.
    pub fn calc_weights(&mut self, regularization: Regularization) -> Result<(), RbfError> {
        self.weights = None;

        if self.points.nrows() == 0 {
            return Err(RbfError::DataNotSet);
        }

        let solver_start = Instant::now();

        let ridge = match regularization {
            Regularization::None => 0.0,
            Regularization::Ridge { lambda } => lambda,
        };

        let gram =
            linalg::build_kernel_matrix_symmetric(&self.points, self.kernel.as_ref(), ridge);

        let expect_spd = is_strictly_positive_definite(self.kernel.kernel_type());

        let solver = match GramSolver::try_new(gram.as_ref(), expect_spd) {
            Ok(solver) => solver,
            Err(FactorizationError::RankDeficient { rank, size }) => {
                return Err(RbfError::SingularSystem {
                    rank,
                    size,
                    coincident_points: common::find_coincident_points(&self.points),
                });
            }
        };

        if expect_spd && matches!(solver, GramSolver::Lu(_)) {
            if let Some(sink) = &self.progress_callback {
                sink.emit(ProgressMsg::Message {
                    message: format!(
                        "Cholesky factorisation of the {:?} kernel matrix failed, \
                         solved with partial pivoting LU instead",
                        self.kernel.kernel_type()
                    ),
                });
            }
        }

        self.weights = Some(solver.solve(&self.point_values));

        let solver_duration = solver_start.elapsed();

        if let Some(sink) = &self.progress_callback {
            sink.emit(ProgressMsg::FitCompleted {
                num_points: self.points.nrows(),
                dimensions: self.points.ncols(),
                duration: solver_duration,
            });
        }

        Ok(())
    }

    /// Evaluates the fitted interpolant at a single query point.
    ///
    /// ### Errors
    /// - [`RbfError::WeightsNotComputed`] when no successful solve has run.
    /// - [`RbfError::QueryDimensionMismatch`] when `x` does not match the
    ///   dimensionality of the data points.
    pub fn calc_value(&self, x: RowRef<f64>) -> Result<f64, RbfError> {
        let weights = self.weights.as_ref().ok_or(RbfError::WeightsNotComputed)?;

        if x.ncols() != self.points.ncols() {
            return Err(RbfError::QueryDimensionMismatch {
                expected: self.points.ncols(),
                found: x.ncols(),
            });
        }

        let value = self
            .points
            .row_iter()
            .enumerate()
            .map(|(i, source)| weights[(i, 0)] * self.kernel.evaluate(x, source))
            .sum();

        Ok(value)
    }

    /// Evaluates the fitted interpolant at each row of `target_points`.
    ///
    /// ### Returns
    /// An `(n_targets x 1)` matrix of interpolated values.
    ///
    /// ### Errors
    /// Same conditions as [`RBFInterpolator::calc_value`].
    pub fn evaluate(&self, target_points: &Mat<f64>) -> Result<Mat<f64>, RbfError> {
        let weights = self.weights.as_ref().ok_or(RbfError::WeightsNotComputed)?;

        if target_points.ncols() != self.points.ncols() {
            return Err(RbfError::QueryDimensionMismatch {
                expected: self.points.ncols(),
                found: target_points.ncols(),
            });
        }

        let kernel_matrix =
            linalg::build_kernel_matrix(target_points, &self.points, self.kernel.as_ref());

        Ok(kernel_matrix * weights)
    }

    /// Evaluates the interpolant at the original source points.
    ///
    /// Useful for convergence checks and diagnostics: without regularization
    /// the result reproduces `point_values` up to solver accuracy, while a
    /// ridge fit exposes the residual introduced by smoothing.
    pub fn evaluate_at_source(&self) -> Result<Mat<f64>, RbfError> {
        self.evaluate(&self.points)
    }

    /// Returns the loaded data points, one per row.
    pub fn points(&self) -> &Mat<f64> {
        &self.points
    }

    /// Returns the loaded point values as an `(n x 1)` matrix.
    pub fn point_values(&self) -> &Mat<f64> {
        &self.point_values
    }

    /// Returns the solved weights, or `None` before a successful
    /// [`RBFInterpolator::calc_weights`].
    pub fn weights(&self) -> Option<&Mat<f64>> {
        self.weights.as_ref()
    }

    /// Returns the kernel this interpolator was configured with.
    pub fn kernel(&self) -> &RbfKernel {
        &self.kernel
    }
}
