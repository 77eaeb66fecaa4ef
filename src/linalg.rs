/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides dense kernel matrix assembly and factorization of the RBF weight system.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::kernels::RadialKernel;
use faer::{
    linalg::solvers::{Llt, PartialPivLu, Solve},
    Mat, MatRef, Side,
};
use std::error::Error;
use std::fmt;

/// Reasons a kernel system factorization can be rejected.
#[derive(Debug, PartialEq)]
pub enum FactorizationError {
    /// The matrix is numerically rank deficient and a solve would
    /// produce untrustworthy weights.
    RankDeficient { rank: usize, size: usize },
}

impl fmt::Display for FactorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorizationError::RankDeficient { rank, size } => {
                write!(f, "matrix is rank deficient: numerical rank {} of {}", rank, size)
            }
        }
    }
}

impl Error for FactorizationError {}

/// Builds a dense kernel matrix between target and source point sets.
///
/// Entry `(i, j)` holds the kernel evaluated between target row `i` and
/// source row `j`.
#[inline(always)]
pub fn build_kernel_matrix<K>(
    target_points: &Mat<f64>,
    source_points: &Mat<f64>,
    kernel: &K,
) -> Mat<f64>
where
    K: RadialKernel,
{
    let m = target_points.nrows();
    let n = source_points.nrows();

    let mut a_matrix = Mat::<f64>::zeros(m, n);

    for j in 0..n {
        let source = source_points.row(j);

        for i in 0..m {
            let target = target_points.row(i);

            a_matrix[(i, j)] = kernel.evaluate(target, source);
        }
    }

    a_matrix
}

/// Builds the symmetric kernel matrix of a point set against itself, adding
/// `ridge` on the diagonal.
///
/// Each unordered pair is evaluated once and written to both triangles, so
/// the result is symmetric by construction.
#[inline(always)]
pub fn build_kernel_matrix_symmetric<K>(points: &Mat<f64>, kernel: &K, ridge: f64) -> Mat<f64>
where
    K: RadialKernel,
{
    let n = points.nrows();

    let mut a_matrix = Mat::<f64>::zeros(n, n);

    for j in 0..n {
        let source_row = points.row(j);

        for i in j..n {
            let target_row = points.row(i);
            let mut k_val = kernel.evaluate(target_row, source_row);

            // Add ridge to the diagonal
            if i == j {
                k_val += ridge;
            }

            // Write both symmetric entries
            a_matrix[(i, j)] = k_val;
            a_matrix[(j, i)] = k_val;
        }
    }

    a_matrix
}

/// Estimates the numerical rank of a matrix.
///
/// Uses QR with column pivoting and counts the diagonal entries of `R` above
/// a threshold relative to the largest one.
pub fn numerical_rank(matrix: MatRef<f64>) -> usize {
    if matrix.nrows().min(matrix.ncols()) == 0 {
        return 0;
    }

    let qrc = matrix.col_piv_qr();
    let rc = qrc.thin_R();

    // Rank threshold: treat tiny diagonal entries of rc as zero.
    let tol = 1E-10;
    let thresh = tol * rc.get(0, 0).abs();

    rc.diagonal()
        .column_vector()
        .iter()
        .filter(|val| val.abs() > thresh)
        .count()
}

/// Factorization of the dense RBF weight system.
///
/// Strictly positive definite kernels try LLᵀ first. Conditionally positive
/// definite kernels produce indefinite matrices, so those systems (and any
/// system LLᵀ rejects) pass a numerical rank gate and are then factorized by
/// LU with partial pivoting. A rank deficient system is reported as an error
/// rather than solved.
#[derive(Debug)]
pub enum GramSolver {
    Llt(Llt<f64>),
    Lu(PartialPivLu<f64>),
}

impl GramSolver {
    /// Factorizes `a`, attempting LLᵀ first when `expect_spd` is set.
    pub fn try_new(a: MatRef<'_, f64>, expect_spd: bool) -> Result<Self, FactorizationError> {
        if expect_spd {
            if let Ok(llt) = a.llt(Side::Lower) {
                return Ok(GramSolver::Llt(llt));
            }
        }

        let size = a.nrows();
        let rank = numerical_rank(a);

        if rank < size {
            return Err(FactorizationError::RankDeficient { rank, size });
        }

        Ok(GramSolver::Lu(a.partial_piv_lu()))
    }

    pub fn solve(&self, rhs: &Mat<f64>) -> Mat<f64> {
        match self {
            GramSolver::Llt(s) => s.solve(rhs),
            GramSolver::Lu(s) => s.solve(rhs),
        }
    }
}
