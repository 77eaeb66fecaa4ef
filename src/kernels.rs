/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the concrete RBF kernel functions and their faer-compatible evaluations.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Implements the concrete RBF kernel functions and their faer-compatible evaluations.
//!
//! Each kernel exposes its scalar profile `phi(r)` of a non-negative distance
//! `r`. Distances are produced internally by the interpolator and are
//! non-negative by construction; passing a negative `r` to `phi` is a caller
//! contract violation with unspecified result.
use crate::common::get_distance;
use crate::interpolant_config::{KernelParams, RBFKernelType};
use faer::RowRef;
use serde::{Deserialize, Serialize};

/// Radially symmetric kernel, evaluated between a pair of points.
pub trait RadialKernel {
    /// Returns `phi(||target - source||)`.
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64;
}

/// Converts a shared [`KernelParams`] configuration into a concrete kernel type.
pub trait KernelFromParams: Sized {
    /// Constructs `Self` from a set of uniform kernel parameters.
    fn from_params(p: &KernelParams) -> Self;
}

/// Gaussian RBF kernel with `phi(r) = exp(-theta * r^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianRbfKernel {
    /// Shape parameter controlling the decay rate. Must be positive.
    pub theta: f64,
}

impl GaussianRbfKernel {
    #[inline(always)]
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    #[inline(always)]
    pub fn eval_r2(&self, r2: f64) -> f64 {
        (-self.theta * r2).exp()
    }

    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        self.eval_r2(r * r)
    }
}

impl RadialKernel for GaussianRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        let r2 = get_distance_sq(target, source);
        self.eval_r2(r2)
    }
}

impl KernelFromParams for GaussianRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.theta)
    }
}

/// Thin plate spline RBF kernel with `phi(r) = r^2 log r`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThinPlateSplineRbfKernel;

impl ThinPlateSplineRbfKernel {
    /// Evaluates the profile, guarding the singular limit at `r = 0`.
    ///
    /// At exactly `r = 0` the product `0 * ln(0)` evaluates to NaN even though
    /// the profile's limit is zero, so the computed output is tested for NaN
    /// and replaced. A NaN input is not masked: `phi(NaN)` stays NaN.
    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        let value = r.powi(2) * r.ln();
        match value.is_nan() && !r.is_nan() {
            true => 0.0,
            false => value,
        }
    }
}

impl RadialKernel for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        let r = get_distance(target, source);
        self.phi(r)
    }
}

impl KernelFromParams for ThinPlateSplineRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        ThinPlateSplineRbfKernel
    }
}

/// Linear RBF kernel with `phi(r) = |r|`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRbfKernel;

impl LinearRbfKernel {
    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        r.abs()
    }
}

impl RadialKernel for LinearRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        let r = get_distance(target, source);
        self.phi(r)
    }
}

impl KernelFromParams for LinearRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        LinearRbfKernel
    }
}

/// Inverse quadratic RBF kernel with `phi(r) = 1 / sqrt(r^2 + theta^2)`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseQuadraticRbfKernel {
    /// Shape parameter bounding the kernel at `r = 0`. Must be positive.
    pub theta: f64,
}

impl InverseQuadraticRbfKernel {
    #[inline(always)]
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    #[inline(always)]
    pub fn eval_r2(&self, r2: f64) -> f64 {
        1.0 / (r2 + self.theta * self.theta).sqrt()
    }

    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        self.eval_r2(r * r)
    }
}

impl RadialKernel for InverseQuadraticRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        let r2 = get_distance_sq(target, source);
        self.eval_r2(r2)
    }
}

impl KernelFromParams for InverseQuadraticRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.theta)
    }
}

/// Runtime kernel selector over the implemented RBF kernels.
///
/// One configured kernel can be shared between interpolators through an
/// `Arc<RbfKernel>`; evaluation is pure and takes `&self`.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub enum RbfKernel {
    Gaussian(GaussianRbfKernel),
    ThinPlateSpline(ThinPlateSplineRbfKernel),
    Linear(LinearRbfKernel),
    InverseQuadratic(InverseQuadraticRbfKernel),
}

impl RbfKernel {
    /// Scalar profile of the selected kernel.
    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        match self {
            RbfKernel::Gaussian(k) => k.phi(r),
            RbfKernel::ThinPlateSpline(k) => k.phi(r),
            RbfKernel::Linear(k) => k.phi(r),
            RbfKernel::InverseQuadratic(k) => k.phi(r),
        }
    }

    /// Returns the [`RBFKernelType`] tag for the selected kernel.
    pub fn kernel_type(&self) -> RBFKernelType {
        match self {
            RbfKernel::Gaussian(_) => RBFKernelType::Gaussian,
            RbfKernel::ThinPlateSpline(_) => RBFKernelType::ThinPlateSpline,
            RbfKernel::Linear(_) => RBFKernelType::Linear,
            RbfKernel::InverseQuadratic(_) => RBFKernelType::InverseQuadratic,
        }
    }
}

impl RadialKernel for RbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: RowRef<f64>, source: RowRef<f64>) -> f64 {
        match self {
            RbfKernel::Gaussian(k) => k.evaluate(target, source),
            RbfKernel::ThinPlateSpline(k) => k.evaluate(target, source),
            RbfKernel::Linear(k) => k.evaluate(target, source),
            RbfKernel::InverseQuadratic(k) => k.evaluate(target, source),
        }
    }
}

impl KernelFromParams for RbfKernel {
    fn from_params(p: &KernelParams) -> Self {
        match p.kernel_type {
            RBFKernelType::Gaussian => RbfKernel::Gaussian(GaussianRbfKernel::from_params(p)),
            RBFKernelType::ThinPlateSpline => {
                RbfKernel::ThinPlateSpline(ThinPlateSplineRbfKernel::from_params(p))
            }
            RBFKernelType::Linear => RbfKernel::Linear(LinearRbfKernel::from_params(p)),
            RBFKernelType::InverseQuadratic => {
                RbfKernel::InverseQuadratic(InverseQuadraticRbfKernel::from_params(p))
            }
        }
    }
}

impl Default for RbfKernel {
    /// The thin plate spline is the default kernel: it takes no shape
    /// parameter and behaves well across data scales.
    fn default() -> Self {
        RbfKernel::ThinPlateSpline(ThinPlateSplineRbfKernel)
    }
}

/// Returns the squared Euclidean distance between two points.
#[inline(always)]
pub fn get_distance_sq(target: RowRef<f64>, source: RowRef<f64>) -> f64 {
    let mut dist = 0.0;
    for (t, s) in target.iter().zip(source.iter()) {
        let diff = t - s;
        dist += diff * diff;
    }
    dist
}
