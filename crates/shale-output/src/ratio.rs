//! Ratio outputs between two configured locations.

use nalgebra::DVector;
use num_complex::Complex;

use shale_core::{ResponseCalc, Result};

use crate::accumulator::Accumulator;
use crate::location::OutputLocation;
use crate::merge::RunArray;
use crate::output::{Output, RunResult, complex_results, real_results};

/// Complex acceleration transfer function between two locations.
///
/// Computed directly between the configured locations rather than from the
/// calculation's designated input. Values keep the full complex response; the
/// reference axis is the motion's frequency grid, re-read every run since
/// grids may differ across scenarios.
#[derive(Debug, Clone)]
pub struct TransferFunctionOutput {
    location_in: OutputLocation,
    location_out: OutputLocation,
    accum: Accumulator<Complex<f64>>,
}

impl TransferFunctionOutput {
    /// Transfer function from `location_in` to `location_out`.
    pub fn new(location_in: OutputLocation, location_out: OutputLocation) -> Self {
        Self {
            location_in,
            location_out,
            accum: Accumulator::new(),
        }
    }

    /// Source position descriptor.
    pub fn location_in(&self) -> &OutputLocation {
        &self.location_in
    }

    /// Destination position descriptor.
    pub fn location_out(&self) -> &OutputLocation {
        &self.location_out
    }

    /// Accumulated frequency axis (Hz).
    pub fn freqs(&self) -> &RunArray<f64> {
        self.accum.refs()
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<Complex<f64>> {
        &self.accum
    }
}

impl Output for TransferFunctionOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let loc_in = self.location_in.resolve(calc.profile())?;
        let loc_out = self.location_out.resolve(calc.profile())?;
        let tf = calc.accel_tf(&loc_in, &loc_out);
        self.accum.record_name(name);
        self.accum.add_values(tf);
        self.accum.add_refs(calc.motion().freqs().clone());
        Ok(())
    }

    fn reset(&mut self) {
        self.accum.reset();
    }

    fn iter_results(&self) -> Box<dyn Iterator<Item = RunResult> + '_> {
        complex_results(&self.accum)
    }

    fn names(&self) -> &[String] {
        self.accum.names()
    }
}

/// Ratio of oscillator response spectra between two locations.
///
/// Constant-reference: the oscillator frequency axis is fixed at
/// construction. Both spectra are computed from the calculation's designated
/// input; the accumulated value is the elementwise out ⁄ in ratio.
#[derive(Debug, Clone)]
pub struct SpectralRatioOutput {
    location_in: OutputLocation,
    location_out: OutputLocation,
    freqs: DVector<f64>,
    osc_damping: f64,
    accum: Accumulator<f64>,
}

impl SpectralRatioOutput {
    /// Spectral ratio between `location_in` and `location_out` at oscillator
    /// `freqs` (Hz) and `osc_damping` (decimal).
    pub fn new(
        freqs: DVector<f64>,
        location_in: OutputLocation,
        location_out: OutputLocation,
        osc_damping: f64,
    ) -> Self {
        Self {
            location_in,
            location_out,
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

    /// Source position descriptor.
    pub fn location_in(&self) -> &OutputLocation {
        &self.location_in
    }

    /// Destination position descriptor.
    pub fn location_out(&self) -> &OutputLocation {
        &self.location_out
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<f64> {
        &self.accum
    }
}

impl Output for SpectralRatioOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let loc_in = self.location_in.resolve(calc.profile())?;
        let loc_out = self.location_out.resolve(calc.profile())?;
        let input = calc.input_location();
        let in_ars = calc.osc_accels(
            &self.freqs,
            self.osc_damping,
            &calc.accel_tf(&input, &loc_in),
        );
        let out_ars = calc.osc_accels(
            &self.freqs,
            self.osc_damping,
            &calc.accel_tf(&input, &loc_out),
        );
        let ratio = out_ars.component_div(&in_ars);
        self.accum.record_name(name);
        self.accum.add_values(ratio);
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
