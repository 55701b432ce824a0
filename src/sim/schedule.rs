use super::engine::SimulationError;

/// Ordered heater toggle times consumed by a forward-only cursor.
///
/// The simulation loop asks [`ToggleSchedule::should_toggle_now`] once per
/// step with that step's time; on `true` it flips the heater and calls
/// [`ToggleSchedule::advance`]. Toggle times earlier than the first step are
/// therefore consumed at the first step, one per step.
///
/// # Examples
///
/// ```
/// use factory_sim::sim::schedule::ToggleSchedule;
///
/// let mut schedule = ToggleSchedule::from_times(vec![0.5, 1.0]).expect("ordered");
/// assert!(!schedule.should_toggle_now(0.25));
/// assert!(schedule.should_toggle_now(0.5));
/// schedule.advance();
/// assert!(!schedule.should_toggle_now(0.75));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleSchedule {
    times: Vec<f64>,
    cursor: usize,
}

impl ToggleSchedule {
    /// Builds a schedule from non-decreasing toggle times.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnorderedToggles`] with the index of the
    /// first time that is smaller than its predecessor (or NaN).
    pub fn from_times(times: Vec<f64>) -> Result<Self, SimulationError> {
        if let Some(i) = times.windows(2).position(|w| !(w[0] <= w[1])) {
            return Err(SimulationError::UnorderedToggles { index: i + 1 });
        }
        if let Some(index) = times.iter().position(|t| t.is_nan()) {
            return Err(SimulationError::UnorderedToggles { index });
        }
        Ok(Self { times, cursor: 0 })
    }

    /// A schedule that never toggles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when the next pending toggle is due at `time`.
    pub fn should_toggle_now(&self, time: f64) -> bool {
        self.times.get(self.cursor).is_some_and(|&due| time >= due)
    }

    /// Consumes the pending toggle. Does nothing once exhausted.
    pub fn advance(&mut self) {
        if self.cursor < self.times.len() {
            self.cursor += 1;
        }
    }

    /// Checks and consumes in one call; returns whether a toggle fired.
    pub fn fire(&mut self, time: f64) -> bool {
        let due = self.should_toggle_now(time);
        if due {
            self.advance();
        }
        due
    }

    pub fn toggles_applied(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.times.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.times.len()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ToggleSchedule;
    use crate::sim::engine::SimulationError;

    #[test]
    fn empty_schedule_never_toggles() {
        let mut schedule = ToggleSchedule::empty();
        assert!(!schedule.should_toggle_now(f64::MAX));
        assert!(!schedule.fire(1e9));
        assert!(schedule.is_exhausted());
    }

    #[test]
    fn cursor_only_moves_forward() {
        let mut schedule = ToggleSchedule::from_times(vec![1.0, 2.0, 3.0]).expect("ordered");
        assert!(schedule.fire(1.5));
        assert_eq!(schedule.toggles_applied(), 1);
        // Going back in time does not rewind the cursor.
        assert!(!schedule.fire(0.0));
        assert_eq!(schedule.remaining(), 2);
    }

    #[test]
    fn late_time_fires_one_toggle_per_call() {
        let mut schedule = ToggleSchedule::from_times(vec![0.1, 0.2, 0.3]).expect("ordered");
        assert!(schedule.fire(10.0));
        assert!(schedule.fire(10.0));
        assert!(schedule.fire(10.0));
        assert!(!schedule.fire(10.0));
        assert_eq!(schedule.toggles_applied(), 3);
    }

    #[test]
    fn advance_past_end_is_a_no_op() {
        let mut schedule = ToggleSchedule::from_times(vec![1.0]).expect("ordered");
        schedule.advance();
        schedule.advance();
        assert_eq!(schedule.toggles_applied(), 1);
        assert_eq!(schedule.remaining(), 0);
    }

    #[test]
    fn equal_times_are_allowed() {
        assert!(ToggleSchedule::from_times(vec![1.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn decreasing_times_are_rejected() {
        assert_eq!(
            ToggleSchedule::from_times(vec![1.0, 3.0, 2.0]),
            Err(SimulationError::UnorderedToggles { index: 2 })
        );
        assert_eq!(
            ToggleSchedule::from_times(vec![f64::NAN]),
            Err(SimulationError::UnorderedToggles { index: 0 })
        );
    }
}
