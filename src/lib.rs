/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for dense RBF interpolation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Dense Radial Basis Function (RBF) interpolation.
//!
//! Radial Basis Function (RBF) interpolation reconstructs a smooth function
//! from scattered data by solving a linear system built from pairwise kernel
//! evaluations. This crate implements the classic dense formulation: the full
//! kernel matrix is assembled and factorised directly, which requires
//! **O(N²)** memory and **O(N³)** operations and suits small to medium point
//! sets of up to a few thousand points.
//!
//! Strictly positive definite kernels are solved with a Cholesky
//! factorisation. Kernels without that guarantee are rank checked and solved
//! with partial pivoting LU, so singular configurations surface as errors
//! rather than as silently corrupt weights.
//!
//! # Features
//! - Gaussian, thin plate spline, linear, and inverse quadratic kernels over
//!   input domains of any dimension
//! - Optional ridge regularization for noisy data, trading exact reproduction
//!   for smoothness
//! - Fitted interpolators serialize with `serde` and can be persisted and
//!   restored without refitting
//! - A strong Wolfe conditions line search for kernel parameter tuning
//!   workflows
//! - Built on [`faer`](https://docs.rs/faer/latest/faer/) for linear algebra, avoiding complex build dependencies
//!
//! # Examples
//!
//! ```
//! use ferreus_rbf_dense::{
//!     RBFInterpolator,
//!     RBFTestFunctions,
//!     generate_random_points,
//!     interpolant_config::{KernelParams, RBFKernelType, Regularization},
//!     kernels::{KernelFromParams, RbfKernel},
//! };
//!
//! // Generate some random data in the unit square
//! let dimensions = 2;
//! let num_points = 30;
//! let source_points = generate_random_points(num_points, dimensions, Some(42));
//!
//! // Assign some values to the source points using Franke's function
//! let source_values = RBFTestFunctions::franke_2d(&source_points);
//!
//! // Configure a thin plate spline kernel
//! let params = KernelParams::builder(RBFKernelType::ThinPlateSpline).build();
//! let kernel = RbfKernel::from_params(&params);
//!
//! // Load the data and solve for the interpolation weights
//! let mut rbfi = RBFInterpolator::builder().kernel(kernel).build();
//! rbfi.set_data(source_points, source_values)?;
//! rbfi.calc_weights(Regularization::None)?;
//!
//! // Evaluate the RBF at the input source locations
//! let fitted = rbfi.evaluate_at_source()?;
//!
//! // Without regularization the interpolant reproduces the source values.
//! let max_diff: f64 = rbfi
//!     .point_values()
//!     .col(0)
//!     .iter()
//!     .zip(fitted.col(0).iter())
//!     .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()));
//!
//! assert!(max_diff < 1e-8);
//! # Ok::<(), ferreus_rbf_dense::RbfError>(())
//! ```
//!
//! # References
//! 1.  Fasshauer, G., 2007. Meshfree Approximation Methods with Matlab. World Scientific Publishing Co.
//! 2.  Wendland, H., 2005. Scattered Data Approximation. Cambridge University Press.
//! 3.  Nocedal, J., Wright, S.J., 2006. Numerical Optimization, 2nd edition. Springer.
pub mod interpolant_config;

pub mod kernels;

mod common;

mod rbf;

mod linalg;

pub mod progress;

pub mod line_search;

mod rbf_test_functions;

pub use {
    common::{
        create_evaluation_grid, find_coincident_points, generate_random_points, get_distance,
    },
    linalg::{
        build_kernel_matrix, build_kernel_matrix_symmetric, numerical_rank, FactorizationError,
        GramSolver,
    },
    rbf::{RBFInterpolator, RBFInterpolatorBuilder, RbfError},
    rbf_test_functions::RBFTestFunctions,
};
