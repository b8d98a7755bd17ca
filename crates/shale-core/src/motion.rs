//! Input-motion representation at the interface boundary.
//!
//! The full motion (Fourier amplitudes, time/frequency conversions) belongs to
//! the solver; the output layer only needs the representation kind, the time
//! step, and the frequency grid.

use std::fmt;

use nalgebra::DVector;

/// Standard gravity (m/s²), used to scale acceleration-derived quantities.
pub const GRAVITY: f64 = 9.80665;

/// Which representation a motion carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    /// Discretized time-domain motion.
    TimeSeries,
    /// Frequency-domain motion with no time discretization.
    FrequencyDomain,
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotionKind::TimeSeries => "time-series",
            MotionKind::FrequencyDomain => "frequency-domain",
        };
        f.write_str(name)
    }
}

/// An input motion as seen by the output layer.
#[derive(Debug, Clone)]
pub enum Motion {
    /// Discretized time-domain motion.
    TimeSeries {
        /// Sample interval (s).
        time_step: f64,
        /// Frequency grid of the Fourier representation (Hz).
        freqs: DVector<f64>,
    },
    /// Frequency-domain motion.
    FrequencyDomain {
        /// Frequency grid (Hz).
        freqs: DVector<f64>,
    },
}

impl Motion {
    /// Representation kind.
    pub fn kind(&self) -> MotionKind {
        match self {
            Motion::TimeSeries { .. } => MotionKind::TimeSeries,
            Motion::FrequencyDomain { .. } => MotionKind::FrequencyDomain,
        }
    }

    /// Frequency grid (Hz).
    pub fn freqs(&self) -> &DVector<f64> {
        match self {
            Motion::TimeSeries { freqs, .. } | Motion::FrequencyDomain { freqs } => freqs,
        }
    }

    /// Sample interval (s), for time-domain motions.
    pub fn time_step(&self) -> Option<f64> {
        match self {
            Motion::TimeSeries { time_step, .. } => Some(*time_step),
            Motion::FrequencyDomain { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_series_exposes_step_and_grid() {
        let motion = Motion::TimeSeries {
            time_step: 0.01,
            freqs: DVector::from_vec(vec![0.0, 1.0, 2.0]),
        };
        assert_eq!(motion.kind(), MotionKind::TimeSeries);
        assert_eq!(motion.time_step(), Some(0.01));
        assert_eq!(motion.freqs().len(), 3);
    }

    #[test]
    fn frequency_domain_has_no_time_step() {
        let motion = Motion::FrequencyDomain {
            freqs: DVector::from_vec(vec![0.5, 1.5]),
        };
        assert_eq!(motion.kind(), MotionKind::FrequencyDomain);
        assert_eq!(motion.time_step(), None);
    }
}
