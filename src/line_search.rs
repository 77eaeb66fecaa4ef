/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements a strong Wolfe conditions line search for smooth unconstrained minimisation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Step length selection satisfying the strong Wolfe conditions.
//!
//! The bracketing and zoom phases follow Algorithms 3.5 and 3.6 of Nocedal
//! and Wright, *Numerical Optimization* (2nd edition). Step lengths found
//! here guarantee both sufficient decrease and the curvature condition,
//! which makes them suitable for quasi-Newton kernel parameter tuning.

use faer::Mat;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Errors reported by the line search.
#[derive(Debug, PartialEq)]
pub enum LineSearchError {
    /// The supplied direction does not decrease the objective at the
    /// starting point.
    NotADescentDirection,

    /// No step satisfying the strong Wolfe conditions was found within the
    /// iteration budget.
    SearchFailed { iterations: usize },
}

impl fmt::Display for LineSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSearchError::NotADescentDirection => {
                write!(f, "the search direction is not a descent direction")
            }
            LineSearchError::SearchFailed { iterations } => write!(
                f,
                "no step satisfied the strong Wolfe conditions within {} iterations",
                iterations
            ),
        }
    }
}

impl Error for LineSearchError {}

/// Tuning constants for [`strong_wolfe_line_search`].
#[derive(Clone, Debug, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineSearchParams {
    /// Sufficient decrease constant of the Armijo condition.
    pub c1: f64,

    /// Curvature condition constant. Must satisfy `c1 < c2 < 1`.
    pub c2: f64,

    /// Iteration budget shared by the bracketing and zoom phases.
    pub max_iterations: usize,
}

impl Default for LineSearchParams {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            c2: 0.9,
            max_iterations: 50,
        }
    }
}

/// Finds a step length along `direction` satisfying the strong Wolfe
/// conditions.
///
/// `f` evaluates the objective and `grad` its gradient; both take the
/// iterate as an `(n x 1)` matrix. The search starts from `alpha_init` and
/// brackets candidate steps within `(0, alpha_max]`, refining the bracket by
/// bisection until a step passes both the sufficient decrease and curvature
/// tests.
///
/// ### Returns
/// The accepted step length.
///
/// ### Errors
/// - [`LineSearchError::NotADescentDirection`] when the directional
///   derivative at the starting point is non-negative.
/// - [`LineSearchError::SearchFailed`] when either phase exhausts
///   `params.max_iterations`.
///
/// ### Panics
/// Panics unless `0 < alpha_init <= alpha_max`.
pub fn strong_wolfe_line_search<F, G>(
    f: &F,
    grad: &G,
    x: &Mat<f64>,
    direction: &Mat<f64>,
    alpha_init: f64,
    alpha_max: f64,
    params: &LineSearchParams,
) -> Result<f64, LineSearchError>
where
    F: Fn(&Mat<f64>) -> f64,
    G: Fn(&Mat<f64>) -> Mat<f64>,
{
    assert!(
        0.0 < alpha_init && alpha_init <= alpha_max,
        "Invalid step bounds: alpha_init = {}, alpha_max = {}",
        alpha_init,
        alpha_max
    );

    let step_point =
        |alpha: f64| Mat::from_fn(x.nrows(), 1, |i, _| x[(i, 0)] + alpha * direction[(i, 0)]);

    let phi = |alpha: f64| f(&step_point(alpha));
    let phi_grad = |alpha: f64| dot(&grad(&step_point(alpha)), direction);

    let phi_zero = phi(0.0);
    let phi_grad_zero = phi_grad(0.0);

    if phi_grad_zero >= 0.0 {
        return Err(LineSearchError::NotADescentDirection);
    }

    // Algorithm 3.6. Interval endpoints are ordered by function value, not
    // by magnitude.
    // TODO: quadratic interpolation of the bracket would need fewer
    // objective evaluations than plain bisection.
    let zoom = |mut alpha_lo: f64, mut alpha_hi: f64| -> Result<f64, LineSearchError> {
        for _ in 0..params.max_iterations {
            let alpha = 0.5 * (alpha_lo + alpha_hi);
            let phi_alpha = phi(alpha);

            if phi_alpha > phi_zero + params.c1 * alpha * phi_grad_zero
                || phi_alpha >= phi(alpha_lo)
            {
                alpha_hi = alpha;
            } else {
                let phi_grad_alpha = phi_grad(alpha);

                if phi_grad_alpha.abs() <= -params.c2 * phi_grad_zero {
                    return Ok(alpha);
                }

                if phi_grad_alpha * (alpha_hi - alpha_lo) >= 0.0 {
                    alpha_hi = alpha_lo;
                }

                alpha_lo = alpha;
            }
        }

        Err(LineSearchError::SearchFailed {
            iterations: params.max_iterations,
        })
    };

    // Algorithm 3.5.
    let mut alpha_prev = 0.0;
    let mut alpha = alpha_init;
    let mut phi_alpha_prev = phi_zero;

    for iteration in 0..params.max_iterations {
        let phi_alpha = phi(alpha);

        if phi_alpha > phi_zero + params.c1 * alpha * phi_grad_zero
            || (iteration > 0 && phi_alpha >= phi_alpha_prev)
        {
            return zoom(alpha_prev, alpha);
        }

        let phi_grad_alpha = phi_grad(alpha);

        if phi_grad_alpha.abs() <= -params.c2 * phi_grad_zero {
            return Ok(alpha);
        }

        if phi_grad_alpha >= 0.0 {
            return zoom(alpha, alpha_prev);
        }

        alpha_prev = alpha;
        phi_alpha_prev = phi_alpha;

        alpha = 0.5 * (alpha + alpha_max);
    }

    Err(LineSearchError::SearchFailed {
        iterations: params.max_iterations,
    })
}

/// Inner product of two `(n x 1)` matrices.
fn dot(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
    a.col(0)
        .iter()
        .zip(b.col(0).iter())
        .map(|(x, y)| x * y)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use faer::mat;

    #[test]
    fn default_params_match_the_usual_constants() {
        let params = LineSearchParams::default();

        assert!(params.c1 == 1e-4);
        assert!(params.c2 == 0.9);
        assert!(params.max_iterations == 50);
    }

    #[test]
    fn quadratic_bowl_accepts_the_exact_minimiser() {
        let f = |x: &Mat<f64>| x.col(0).iter().map(|v| v * v).sum::<f64>();
        let grad = |x: &Mat<f64>| Mat::from_fn(x.nrows(), 1, |i, _| 2.0 * x[(i, 0)]);

        let x = mat![[1.0], [1.0]];
        let direction = mat![[-2.0], [-2.0]];

        let alpha = strong_wolfe_line_search(
            &f,
            &grad,
            &x,
            &direction,
            0.5,
            1.0,
            &LineSearchParams::default(),
        )
        .unwrap();

        // x + 0.5 * direction is the unconstrained minimiser.
        assert!(alpha == 0.5);
    }

    #[test]
    fn rosenbrock_step_satisfies_both_wolfe_conditions() {
        let f = |x: &Mat<f64>| {
            let (a, b) = (x[(0, 0)], x[(1, 0)]);
            100.0 * (b - a * a).powi(2) + (1.0 - a).powi(2)
        };
        let grad = |x: &Mat<f64>| {
            let (a, b) = (x[(0, 0)], x[(1, 0)]);
            mat![
                [-400.0 * a * (b - a * a) - 2.0 * (1.0 - a)],
                [200.0 * (b - a * a)]
            ]
        };

        let params = LineSearchParams::default();
        let x = mat![[-1.2], [1.0]];

        let gradient_at_start = grad(&x);
        let direction = Mat::from_fn(2, 1, |i, _| -gradient_at_start[(i, 0)]);

        let alpha =
            strong_wolfe_line_search(&f, &grad, &x, &direction, 0.01, 1.0, &params).unwrap();

        let step = Mat::from_fn(2, 1, |i, _| x[(i, 0)] + alpha * direction[(i, 0)]);
        let phi_zero = f(&x);
        let phi_alpha = f(&step);
        let phi_grad_zero = dot(&grad(&x), &direction);
        let phi_grad_alpha = dot(&grad(&step), &direction);

        assert!(alpha > 0.0);
        assert!(phi_alpha <= phi_zero + params.c1 * alpha * phi_grad_zero);
        assert!(phi_grad_alpha.abs() <= -params.c2 * phi_grad_zero);
    }

    #[test]
    fn ascent_directions_are_rejected() {
        let f = |x: &Mat<f64>| x.col(0).iter().map(|v| v * v).sum::<f64>();
        let grad = |x: &Mat<f64>| Mat::from_fn(x.nrows(), 1, |i, _| 2.0 * x[(i, 0)]);

        let x = mat![[1.0], [1.0]];
        let direction = mat![[1.0], [1.0]];

        let err = strong_wolfe_line_search(
            &f,
            &grad,
            &x,
            &direction,
            0.5,
            1.0,
            &LineSearchParams::default(),
        )
        .unwrap_err();

        assert!(err == LineSearchError::NotADescentDirection);
    }

    #[test]
    fn unbounded_descent_exhausts_the_iteration_budget() {
        // The objective decreases forever along the direction, so the
        // curvature condition can never hold.
        let f = |x: &Mat<f64>| -x[(0, 0)];
        let grad = |_: &Mat<f64>| mat![[-1.0]];

        let x = mat![[0.0]];
        let direction = mat![[1.0]];

        let err = strong_wolfe_line_search(
            &f,
            &grad,
            &x,
            &direction,
            0.5,
            1.0,
            &LineSearchParams::default(),
        )
        .unwrap_err();

        assert!(err == LineSearchError::SearchFailed { iterations: 50 });
    }
}
