/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies kernel and regularization options for configuring RBF interpolants.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies kernel and regularization options for configuring RBF interpolants.
use serde::{Deserialize, Serialize};

/// The implemented RBF kernel types.
///
/// See [`crate::kernels`] for the kernel profiles behind each variant.
#[derive(Clone, Debug, Copy, Serialize, Deserialize, PartialEq)]
pub enum RBFKernelType {
    Gaussian,
    ThinPlateSpline,
    Linear,
    InverseQuadratic,
}

/// Returns whether the provided [`RBFKernelType`] yields a strictly positive
/// definite kernel matrix for distinct points.
///
/// Strictly positive definite kernels can be factorized by Cholesky (LLᵀ)
/// directly. Conditionally positive definite kernels (linear, thin plate
/// spline) produce indefinite kernel matrices and must be solved by a
/// pivoted factorization instead.
pub fn is_strictly_positive_definite(kernel: RBFKernelType) -> bool {
    match kernel {
        RBFKernelType::Gaussian => true,
        RBFKernelType::ThinPlateSpline => false,
        RBFKernelType::Linear => false,
        RBFKernelType::InverseQuadratic => true,
    }
}

/// Defines the [`RBFKernelType`] to use, along with the shape parameter
/// for the kernels that take one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KernelParams {
    /// RBFKernelType enum variant to use.
    pub kernel_type: RBFKernelType,

    /// Shape parameter controlling how quickly the kernel decays away from
    /// each point. Must be positive.
    ///
    /// Only used by the Gaussian and inverse quadratic kernels.
    pub theta: f64,
}

impl KernelParams {
    /// Begins building a [`KernelParams`] instance for the given kernel type.
    pub fn builder(kernel_type: RBFKernelType) -> KernelParamsBuilder {
        KernelParamsBuilder {
            kernel_type,
            theta: 1.0,
        }
    }
}

/// Builder for [`KernelParams`] that provides sensible defaults.
#[derive(Debug, Clone, Copy)]
pub struct KernelParamsBuilder {
    kernel_type: RBFKernelType,
    theta: f64,
}

impl KernelParamsBuilder {
    /// Sets the `theta` shape parameter on the builder.
    pub fn theta(mut self, v: f64) -> Self {
        self.theta = v;
        self
    }

    /// Finalises the builder into a [`KernelParams`] value.
    pub fn build(self) -> KernelParams {
        assert!(self.theta > 0.0);
        KernelParams {
            kernel_type: self.kernel_type,
            theta: self.theta,
        }
    }
}

/// Controls the diagonal loading applied when solving for RBF weights.
///
/// `None` requests an exact fit: the interpolant reproduces the input values
/// at every data point, provided the kernel system is numerically solvable.
/// `Ridge` adds `lambda` to the kernel matrix diagonal, trading exactness for
/// conditioning. This is the usual remedy when an exact fit fails with a
/// singular system, or when the input values are noisy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Regularization {
    /// Solve the unmodified kernel system.
    None,

    /// Add `lambda` to the kernel matrix diagonal before solving.
    Ridge { lambda: f64 },
}

impl Regularization {
    /// Ridge regularization with the default `lambda` of `0.001`.
    pub fn ridge() -> Self {
        Regularization::Ridge { lambda: 0.001 }
    }
}
