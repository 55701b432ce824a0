/// One trapezoidal-rule step over `[x, x + dx]`.
///
/// Returns the estimated change of the integrated quantity,
/// `dx * (f(x) + f(x + dx)) / 2`. NaN and overflow propagate untouched.
///
/// # Examples
///
/// ```
/// use factory_sim::sim::quadrature::trapezoidal;
///
/// // Exact for linear integrands: ∫₀¹ 2x dx = 1
/// assert_eq!(trapezoidal(|x| 2.0 * x, 0.0, 1.0), 1.0);
/// ```
pub fn trapezoidal(f: impl Fn(f64) -> f64, x: f64, dx: f64) -> f64 {
    dx * (f(x) + f(x + dx)) / 2.0
}
