//! Differentiable surrogates for the maximum and minimum of density values
//!
//! The layer recursion of the printability filter aggregates support densities with a smoothed
//! maximum and caps them against the blueprint density with a smoothed minimum. Both surrogates
//! are smooth in their arguments so that the composed filter admits an adjoint; their partial
//! derivatives are provided alongside for the reverse sweep.

use crate::FilterError;

/// Tolerance of the smoothed minimum if none is provided explicitly.
///
/// With this choice `smooth_min(0.0, 1.0)` evaluates to `0.5 * EPSILON.sqrt()`, roughly 7.45e-9.
pub const SMOOTH_MIN_EPSILON: f64 = f64::EPSILON;

/// Computes the smoothed maximum of the given non-negative values.
///
/// Evaluates the p-norm `(sum x_i^p)^(1/q)` with the exponent correction
/// `q = p + ln(n)/ln(1/2)` so that n copies of one half aggregate to exactly one half.
/// The result underestimates the true maximum for values below one and converges to it as
/// `p_norm` grows. The running maximum is factored out before exponentiating so that values
/// slightly above one do not overflow for large exponents.
pub fn smooth_max(values: &[f64], p_norm: f64) -> Result<f64, FilterError> {
    if values.is_empty() {
        return Err(FilterError::EmptySmoothMaxArguments);
    }

    let mut max = 0.0f64;
    for &value in values {
        if value < 0.0 {
            return Err(FilterError::NegativeSmoothMaxArgument(value));
        }
        max = max.max(value);
    }
    if max == 0.0 {
        return Ok(0.0);
    }

    let q = q_exponent(values.len(), p_norm);
    let scaled_sum: f64 = values.iter().map(|&value| (value / max).powf(p_norm)).sum();
    Ok(max.powf(p_norm / q) * scaled_sum.powf(q.recip()))
}

/// Computes the gradient of [smooth_max] with respect to each of its arguments
pub fn smooth_max_gradient(values: &[f64], p_norm: f64) -> Result<Vec<f64>, FilterError> {
    if values.is_empty() {
        return Err(FilterError::EmptySmoothMaxArguments);
    }

    let mut max = 0.0f64;
    for &value in values {
        if value < 0.0 {
            return Err(FilterError::NegativeSmoothMaxArgument(value));
        }
        max = max.max(value);
    }
    if max == 0.0 {
        return Ok(vec![0.0; values.len()]);
    }

    let q = q_exponent(values.len(), p_norm);
    let scaled_sum: f64 = values.iter().map(|&value| (value / max).powf(p_norm)).sum();
    // d/dx_j (sum x_i^p)^(1/q) = (p/q) x_j^(p-1) (sum x_i^p)^(1/q - 1), with the maximum
    // factored out of both powers
    let common = (p_norm / q) * max.powf(p_norm / q - 1.0) * scaled_sum.powf(q.recip() - 1.0);
    Ok(values
        .iter()
        .map(|&value| common * (value / max).powf(p_norm - 1.0))
        .collect())
}

fn q_exponent(count: usize, p_norm: f64) -> f64 {
    p_norm + (count as f64).ln() / 0.5f64.ln()
}

/// Computes the smoothed minimum of the two values with the default tolerance [SMOOTH_MIN_EPSILON]
pub fn smooth_min(a: f64, b: f64) -> f64 {
    smooth_min_with_epsilon(a, b, SMOOTH_MIN_EPSILON)
}

/// Computes the smoothed minimum of the two values with the given tolerance.
///
/// Evaluates `0.5 * (a + b - sqrt((a - b)^2 + eps)) + 0.5 * sqrt(eps)`. The additive
/// `0.5 * sqrt(eps)` keeps `smooth_min(a, a) == a`; the price is that the result can exceed
/// the true minimum by up to that offset. Symmetric and monotone in both arguments.
pub fn smooth_min_with_epsilon(a: f64, b: f64, eps: f64) -> f64 {
    let difference = a - b;
    0.5 * (a + b - (difference * difference + eps).sqrt()) + 0.5 * eps.sqrt()
}

/// Computes the partial derivatives of [smooth_min_with_epsilon] with respect to both arguments
pub fn smooth_min_partials(a: f64, b: f64, eps: f64) -> (f64, f64) {
    let difference = a - b;
    let root = (difference * difference + eps).sqrt();
    (0.5 * (1.0 - difference / root), 0.5 * (1.0 + difference / root))
}
