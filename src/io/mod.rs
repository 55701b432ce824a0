//! File output for simulated trajectories.

pub mod export;
