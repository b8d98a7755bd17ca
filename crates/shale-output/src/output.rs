//! The output contract shared by every variant.

use nalgebra::DVector;
use num_complex::Complex;

use shale_core::{ResponseCalc, Result};

use crate::accumulator::Accumulator;

/// Values of a single run, in the scalar kind the variant accumulates.
///
/// Most outputs are real-valued; the transfer-function output keeps the full
/// complex frequency response.
#[derive(Debug, Clone)]
pub enum RunValues {
    /// Real-valued result series.
    Real(DVector<f64>),
    /// Complex-valued result series.
    Complex(DVector<Complex<f64>>),
}

impl RunValues {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            RunValues::Real(v) => v.len(),
            RunValues::Complex(v) => v.len(),
        }
    }

    /// Whether the run has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Real view, if this run is real-valued.
    pub fn as_real(&self) -> Option<&DVector<f64>> {
        match self {
            RunValues::Real(v) => Some(v),
            RunValues::Complex(_) => None,
        }
    }

    /// Complex view, if this run is complex-valued.
    pub fn as_complex(&self) -> Option<&DVector<Complex<f64>>> {
        match self {
            RunValues::Real(_) => None,
            RunValues::Complex(v) => Some(v),
        }
    }
}

/// One run's accumulated result: label, reference axis, values.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Run label.
    pub name: String,
    /// Reference axis for this run (time, frequency, or depth).
    pub refs: DVector<f64>,
    /// Result values for this run.
    pub values: RunValues,
}

/// A derived result quantity accumulated across analysis runs.
///
/// Variants are constructed once with their configuration fixed, invoked once
/// per completed run, and iterated for reporting. [`reset`] returns the
/// output to its pre-run state, preserving the reference axis where the
/// variant declares it constant.
///
/// [`reset`]: Output::reset
pub trait Output {
    /// Capture the current run from `calc`, accumulating one new column.
    ///
    /// A run with no explicit `name` is labelled `r1`, `r2`, … in invocation
    /// order. On error nothing is accumulated: the run's name, values, and
    /// reference axis are appended together or not at all.
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()>;

    /// Clear accumulated runs.
    fn reset(&mut self);

    /// Iterate per-run results, freshly derived from the current state.
    fn iter_results(&self) -> Box<dyn Iterator<Item = RunResult> + '_>;

    /// Accumulated run names, in invocation order.
    fn names(&self) -> &[String];
}

pub(crate) fn real_results(accum: &Accumulator<f64>) -> Box<dyn Iterator<Item = RunResult> + '_> {
    Box::new(accum.iter_results().map(|(name, refs, values)| RunResult {
        name: name.to_string(),
        refs,
        values: RunValues::Real(values),
    }))
}

pub(crate) fn complex_results(
    accum: &Accumulator<Complex<f64>>,
) -> Box<dyn Iterator<Item = RunResult> + '_> {
    Box::new(accum.iter_results().map(|(name, refs, values)| RunResult {
        name: name.to_string(),
        refs,
        values: RunValues::Complex(values),
    }))
}
