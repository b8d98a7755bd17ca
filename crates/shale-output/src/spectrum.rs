//! Oscillator response-spectrum output.

use nalgebra::DVector;

use shale_core::{ResponseCalc, Result};

use crate::accumulator::Accumulator;
use crate::location::OutputLocation;
use crate::output::{Output, RunResult, real_results};

/// Peak oscillator response accelerations at fixed frequencies and damping.
///
/// Constant-reference: the frequency axis is set at construction, never
/// altered by runs, and survives [`reset`].
///
/// [`reset`]: Output::reset
#[derive(Debug, Clone)]
pub struct ResponseSpectrumOutput {
    location: OutputLocation,
    freqs: DVector<f64>,
    osc_damping: f64,
    accum: Accumulator<f64>,
}

impl ResponseSpectrumOutput {
    /// Spectrum at `location` for oscillator `freqs` (Hz) and `osc_damping`
    /// (decimal).
    pub fn new(freqs: DVector<f64>, location: OutputLocation, osc_damping: f64) -> Self {
        Self {
            location,
            accum: Accumulator::with_const_refs(freqs.clone()),
            freqs,
            osc_damping,
        }
    }

    /// Oscillator frequencies (Hz).
    pub fn freqs(&self) -> &DVector<f64> {
        &self.freqs
    }

    /// Oscillator periods (s), the reciprocal frequencies.
    pub fn periods(&self) -> DVector<f64> {
        self.freqs.map(|f| 1.0 / f)
    }

    /// Oscillator damping ratio (decimal).
    pub fn osc_damping(&self) -> f64 {
        self.osc_damping
    }

    /// Sampling position descriptor.
    pub fn location(&self) -> &OutputLocation {
        &self.location
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<f64> {
        &self.accum
    }
}

impl Output for ResponseSpectrumOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let loc = self.location.resolve(calc.profile())?;
        let tf = calc.accel_tf(&calc.input_location(), &loc);
        let ars = calc.osc_accels(&self.freqs, self.osc_damping, &tf);
        self.accum.record_name(name);
        self.accum.add_values(ars);
        Ok(())
    }

    fn reset(&mut self) {
        self.accum.reset();
    }

    fn iter_results(&self) -> Box<dyn Iterator<Item = RunResult> + '_> {
        real_results(&self.accum)
    }

    fn names(&self) -> &[String] {
        self.accum.names()
    }
}
