/// Evenly spaced time samples covering `[start, stop]`.
///
/// The first sample is `start`; samples are `start + i * step`, computed
/// from the index so rounding does not accumulate. The last sample is the
/// first one at or beyond `stop` (up to a relative tolerance), matching
/// `arange(start, stop + step, step)`.
///
/// Returns an empty vector for a non-positive or non-finite step, or when
/// `stop < start`.
///
/// # Examples
///
/// ```
/// use factory_sim::sim::grid::evenly_spaced;
///
/// let grid = evenly_spaced(0.0, 1.0, 0.001);
/// assert_eq!(grid.len(), 1001);
/// assert_eq!(grid[0], 0.0);
/// assert!((grid[1000] - 1.0).abs() < 1e-12);
/// ```
pub fn evenly_spaced(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0 && start.is_finite() && stop.is_finite()) || stop < start {
        return Vec::new();
    }
    let raw = (stop - start) / step;
    let steps = (raw - 1e-9 * raw.max(1.0)).ceil().max(0.0) as usize;
    (0..=steps).map(|i| start + i as f64 * step).collect()
}

/// Number of integration steps a grid of `samples` points yields.
pub fn step_count(samples: usize) -> usize {
    samples.saturating_sub(1)
}
