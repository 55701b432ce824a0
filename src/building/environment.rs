//! Outdoor temperature as a pure function of time.

use std::f64::consts::{FRAC_PI_2, PI};

/// Daily outdoor cycle: angular frequency for a 24 hour period.
const DAILY_ANGULAR_FREQUENCY: f64 = PI / 12.0;
/// Hour of day at which the daily cycle crosses its mean on the way up.
const DAILY_PHASE_SHIFT_HR: f64 = 9.0;

/// Whether an extremum is a local maximum or a local minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Peak,
    Trough,
}

/// A turning point of a temperature series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub time: f64,
    pub temperature: f64,
    pub kind: ExtremumKind,
}

/// `mean + half_range * sin(angular_frequency * (t - phase_shift))`.
///
/// # Examples
///
/// ```
/// use factory_sim::building::Sinusoid;
///
/// let s = Sinusoid::new(1.0, 0.05, 1.0, 0.0);
/// assert_eq!(s.value(0.0), 1.0);
/// assert!((s.period() - std::f64::consts::TAU).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    pub mean: f64,
    pub half_range: f64,
    pub angular_frequency: f64,
    pub phase_shift: f64,
}

impl Sinusoid {
    pub fn new(mean: f64, half_range: f64, angular_frequency: f64, phase_shift: f64) -> Self {
        Self {
            mean,
            half_range,
            angular_frequency,
            phase_shift,
        }
    }

    pub fn value(&self, time: f64) -> f64 {
        self.half_range * (self.angular_frequency * (time - self.phase_shift)).sin() + self.mean
    }

    /// Length of one full oscillation.
    pub fn period(&self) -> f64 {
        2.0 * PI / self.angular_frequency
    }

    /// Index `k` of the extremum at `phase_shift + (π/2 + kπ) / ω`.
    fn extremum_time(&self, k: i64) -> f64 {
        self.phase_shift + (FRAC_PI_2 + k as f64 * PI) / self.angular_frequency
    }

    fn extremum(&self, k: i64) -> Extremum {
        // Even k lands on sin = 1, odd k on sin = -1.
        let (sign, kind) = if k.rem_euclid(2) == 0 {
            (1.0, ExtremumKind::Peak)
        } else {
            (-1.0, ExtremumKind::Trough)
        };
        Extremum {
            time: self.extremum_time(k),
            temperature: self.mean + sign * self.half_range,
            kind,
        }
    }

    fn extremum_index_floor(&self, time: f64) -> i64 {
        ((self.angular_frequency * (time - self.phase_shift) - FRAC_PI_2) / PI).floor() as i64
    }

    /// Analytic extrema with `from <= time <= to`, in time order.
    ///
    /// Returns an empty vector when the frequency is not a positive finite
    /// number or the window is empty.
    pub fn extrema_between(&self, from: f64, to: f64) -> Vec<Extremum> {
        if !self.has_valid_frequency() || !(from <= to) {
            return Vec::new();
        }
        let mut k = self.extremum_index_floor(from);
        if self.extremum_time(k) < from {
            k += 1;
        }
        self.collect_until(k, to)
    }

    /// Analytic extrema starting with the last one at or before `time`, up to `until`.
    pub fn extrema_since(&self, time: f64, until: f64) -> Vec<Extremum> {
        if !self.has_valid_frequency() {
            return Vec::new();
        }
        let mut k = self.extremum_index_floor(time);
        if self.extremum_time(k) > time {
            k -= 1;
        }
        self.collect_until(k, until)
    }

    fn collect_until(&self, mut k: i64, until: f64) -> Vec<Extremum> {
        let mut extrema = Vec::new();
        loop {
            let extremum = self.extremum(k);
            if extremum.time > until {
                break;
            }
            extrema.push(extremum);
            k += 1;
        }
        extrema
    }

    fn has_valid_frequency(&self) -> bool {
        self.angular_frequency.is_finite() && self.angular_frequency > 0.0
    }
}

/// Daily outdoor temperature cycle, time in hours.
///
/// The minimum falls at 03:00 and the maximum at 15:00.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorEnvironment {
    pub mean_temp: f64,
    pub half_range_temp: f64,
}

impl OutdoorEnvironment {
    pub fn new(mean_temp: f64, half_range_temp: f64) -> Self {
        Self {
            mean_temp,
            half_range_temp,
        }
    }

    pub fn temperature_at(&self, time_hr: f64) -> f64 {
        self.sinusoid().value(time_hr)
    }

    pub fn sinusoid(&self) -> Sinusoid {
        Sinusoid::new(
            self.mean_temp,
            self.half_range_temp,
            DAILY_ANGULAR_FREQUENCY,
            DAILY_PHASE_SHIFT_HR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn daily_cycle_turning_points() {
        let outdoors = OutdoorEnvironment::new(8.0, 4.0);
        assert_relative_eq!(outdoors.temperature_at(9.0), 8.0, epsilon = 1e-12);
        assert_relative_eq!(outdoors.temperature_at(15.0), 12.0, epsilon = 1e-12);
        assert_relative_eq!(outdoors.temperature_at(3.0), 4.0, epsilon = 1e-12);
        assert_relative_eq!(outdoors.sinusoid().period(), 24.0, epsilon = 1e-12);
    }

    #[test]
    fn extrema_between_alternate_and_match_values() {
        let outdoors = OutdoorEnvironment::new(8.0, 4.0).sinusoid();
        let extrema = outdoors.extrema_between(0.0, 48.0);
        let times: Vec<f64> = extrema.iter().map(|e| e.time).collect();
        assert_eq!(times.len(), 4);
        for (got, want) in times.iter().zip([3.0, 15.0, 27.0, 39.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
        assert_eq!(extrema[0].kind, ExtremumKind::Trough);
        assert_eq!(extrema[0].temperature, 4.0);
        assert_eq!(extrema[1].kind, ExtremumKind::Peak);
        assert_eq!(extrema[1].temperature, 12.0);
    }

    #[test]
    fn extrema_since_starts_at_or_before_time() {
        let s = Sinusoid::new(1.0, 0.05, 1.0, 0.0);
        let extrema = s.extrema_since(2.0, 10.0);
        assert_relative_eq!(extrema[0].time, FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(extrema[0].kind, ExtremumKind::Peak);
        assert!(extrema.iter().all(|e| e.time <= 10.0));
        assert_eq!(extrema.len(), 3);
    }

    #[test]
    fn invalid_frequency_yields_no_extrema() {
        let s = Sinusoid::new(1.0, 0.05, 0.0, 0.0);
        assert!(s.extrema_between(0.0, 10.0).is_empty());
        assert!(s.extrema_since(0.0, 10.0).is_empty());
    }
}
