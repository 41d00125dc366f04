//! Nelder-Mead downhill simplex.

use crate::error::{MathError, MathResult};
use crate::optimization::{Bounds, OptimizationConfig, OptimizationResult};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimizes `f` inside `bounds` with the Nelder-Mead simplex method.
///
/// Every trial vertex is clamped onto the box. Terminates when both the
/// spread of objective values and the simplex diameter fall below the
/// tolerance, or after `max_iterations`; the best vertex is returned either
/// way with `converged` set accordingly.
///
/// # Example
///
/// ```rust
/// use vertice_math::optimization::{nelder_mead, Bounds, OptimizationConfig};
///
/// let bounds = Bounds::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
/// let f = |p: &[f64]| (p[0] - 1.0).powi(2) + (p[1] + 2.0).powi(2);
/// let result = nelder_mead(f, &[0.0, 0.0], &bounds, &OptimizationConfig::default()).unwrap();
///
/// assert!(result.converged);
/// assert!((result.parameters[0] - 1.0).abs() < 1e-4);
/// ```
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    bounds: &Bounds,
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = bounds.dimension();
    if initial.len() != dim {
        return Err(MathError::dimension_mismatch((initial.len(), 1), (dim, 1)));
    }
    if dim == 0 {
        return Err(MathError::invalid_input("cannot optimize over zero parameters"));
    }

    let x0 = bounds.clamp(initial);
    let mut simplex = vec![x0.clone()];
    for d in 0..dim {
        let step = bounds.width(d) * config.initial_step.max(1e-4);
        let mut x = x0.clone();
        x[d] += step;
        if (bounds.clamp(&x)[d] - x0[d]).abs() < 1e-14 {
            x[d] = x0[d] - step;
        }
        simplex.push(bounds.clamp(&x));
    }
    let mut values: Vec<f64> = simplex.iter().map(|x| f(x)).collect();

    let mut converged = false;
    let mut iterations = 0;

    for iteration in 0..config.max_iterations {
        iterations = iteration + 1;

        let mut order: Vec<usize> = (0..=dim).collect();
        order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
        simplex = order.iter().map(|&i| simplex[i].clone()).collect();
        values = order.iter().map(|&i| values[i]).collect();

        let centroid: Vec<f64> = (0..dim)
            .map(|d| simplex[..dim].iter().map(|x| x[d]).sum::<f64>() / dim as f64)
            .collect();

        let spread = (values[dim] - values[0]).abs();
        let diameter = simplex
            .iter()
            .map(|x| distance(x, &centroid))
            .fold(0.0_f64, f64::max);
        if spread <= config.tolerance && diameter <= config.tolerance {
            converged = true;
            break;
        }

        let along = |coef: f64, towards: &[f64]| -> Vec<f64> {
            let point: Vec<f64> = centroid
                .iter()
                .zip(towards)
                .map(|(c, t)| c + coef * (t - c))
                .collect();
            bounds.clamp(&point)
        };

        let reflected = along(-REFLECTION, &simplex[dim]);
        let f_reflected = f(&reflected);

        if f_reflected < values[0] {
            let expanded = along(EXPANSION, &reflected);
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                simplex[dim] = expanded;
                values[dim] = f_expanded;
            } else {
                simplex[dim] = reflected;
                values[dim] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[dim - 1] {
            simplex[dim] = reflected;
            values[dim] = f_reflected;
            continue;
        }

        let contracted = along(CONTRACTION, &simplex[dim]);
        let f_contracted = f(&contracted);
        if f_contracted < values[dim] {
            simplex[dim] = contracted;
            values[dim] = f_contracted;
            continue;
        }

        let best = simplex[0].clone();
        for i in 1..=dim {
            let shrunk: Vec<f64> = best
                .iter()
                .zip(&simplex[i])
                .map(|(b, x)| b + SHRINK * (x - b))
                .collect();
            simplex[i] = bounds.clamp(&shrunk);
            values[i] = f(&simplex[i]);
        }
    }

    let best = (0..=dim)
        .min_by(|&i, &j| values[i].total_cmp(&values[j]))
        .unwrap_or(0);

    Ok(OptimizationResult {
        parameters: simplex[best].clone(),
        objective_value: values[best],
        iterations,
        converged,
    })
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
