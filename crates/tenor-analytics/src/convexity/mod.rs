//! Convexity calculations for fixed income instruments.
//!
//! Convexity measures the curvature of the price-yield relationship,
//! capturing the second-order effect that duration misses. The analytical
//! figure is produced alongside duration by
//! [`compute_duration`](crate::duration::compute_duration); this module adds
//! the finite-difference counterpart and the second-order price estimate.
//!
//! ## Formula
//!
//! Analytical convexity:
//! ```text
//! C = Σ(t_i × (t_i + 1/f) × PV(CF_i)) / (P × (1 + y/f)²)
//! ```
//!
//! Effective convexity:
//! ```text
//! C_eff = (P₋ + P₊ - 2×P₀) / (P₀ × Δy²)
//! ```

mod effective;

pub use effective::*;

/// Calculate price change including both duration and convexity effects.
///
/// # Formula
///
/// ```text
/// ΔP/P ≈ -D_mod × Δy + (1/2) × C × (Δy)²
/// ```
pub fn price_change_with_convexity(
    mod_duration: f64,
    convexity: f64,
    price: f64,
    yield_change: f64,
) -> f64 {
    let duration_effect = -mod_duration * price * yield_change;
    let convexity_effect = 0.5 * convexity * price * yield_change.powi(2);
    duration_effect + convexity_effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_change_with_convexity() {
        // Duration effect: -5 × 100 × 0.01 = -5.0
        // Convexity effect: 0.5 × 50 × 100 × 0.0001 = 0.25
        let change = price_change_with_convexity(5.0, 50.0, 100.0, 0.01);
        assert_relative_eq!(change, -4.75, epsilon = 0.001);
    }

    #[test]
    fn test_convexity_term_is_symmetric() {
        let up = price_change_with_convexity(7.0, 60.0, 1000.0, 0.005);
        let down = price_change_with_convexity(7.0, 60.0, 1000.0, -0.005);
        // Linear terms cancel, leaving 2 × ½ × C × P × Δy²
        assert_relative_eq!(up + down, 60.0 * 1000.0 * 0.005_f64.powi(2), epsilon = 1e-9);
    }
}
