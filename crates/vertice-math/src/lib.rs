//! # Vertice Math
//!
//! Numerical utilities for the Vertice market risk library.
//!
//! This crate provides:
//!
//! - **Solvers**: bracketing root finders (regula falsi, bisection)
//! - **Optimization**: bounded Nelder-Mead simplex search
//! - **Interpolation**: linear interpolation without extrapolation
//! - **Statistics**: moments, linear quantiles, EWMA recursions, normal and
//!   chi-squared helpers
//! - **Linear Algebra**: quadratic forms and covariance/correlation helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod optimization;
pub mod solvers;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::optimization::{
        nelder_mead, Bounds, OptimizationConfig, OptimizationResult,
    };
    pub use crate::solvers::{bisection, regula_falsi, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
