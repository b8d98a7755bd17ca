//! Time-history outputs synthesized from the current run's transfer functions.

use std::f64::consts::PI;

use nalgebra::DVector;
use num_complex::Complex;

use shale_core::{Error, GRAVITY, Location, Motion, ResponseCalc, Result, WaveField};

use crate::accumulator::Accumulator;
use crate::location::OutputLocation;
use crate::merge::RunArray;
use crate::output::{Output, RunResult, real_results};

/// Shared invocation sequence for the time-history variants.
///
/// All fallible steps run before the first mutation, so a failed run leaves
/// the accumulated state untouched. The time axis is recomputed from the
/// transformed series every run, feeding the shared/ragged decision in the
/// accumulator.
fn invoke_time_series(
    accum: &mut Accumulator<f64>,
    location: &OutputLocation,
    calc: &dyn ResponseCalc,
    name: Option<&str>,
    trans_func: impl FnOnce(&dyn ResponseCalc, &Location) -> DVector<Complex<f64>>,
    modify: impl FnOnce(&dyn ResponseCalc, f64, &Location, DVector<f64>) -> DVector<f64>,
) -> Result<()> {
    let time_step = match calc.motion() {
        Motion::TimeSeries { time_step, .. } => *time_step,
        motion => {
            return Err(Error::UnsupportedMotionKind {
                found: motion.kind(),
            });
        }
    };
    let loc = location.resolve(calc.profile())?;
    let tf = trans_func(calc, &loc);
    let series = modify(calc, time_step, &loc, calc.time_series(&tf));

    accum.record_name(name);
    let refs = DVector::from_fn(series.len(), |i, _| time_step * i as f64);
    accum.add_values(series);
    accum.add_refs(refs);
    Ok(())
}

fn require_within(what: &str, location: &OutputLocation) -> Result<()> {
    if location.wave_field() != WaveField::Within {
        return Err(Error::PreconditionViolation(format!(
            "{what} output requires a within-medium location, got {}",
            location.wave_field()
        )));
    }
    Ok(())
}

/// Acceleration time history at a location.
#[derive(Debug, Clone)]
pub struct AccelerationOutput {
    location: OutputLocation,
    accum: Accumulator<f64>,
}

impl AccelerationOutput {
    /// Output at `location`.
    pub fn new(location: OutputLocation) -> Self {
        Self {
            location,
            accum: Accumulator::new(),
        }
    }

    /// Sampling position descriptor.
    pub fn location(&self) -> &OutputLocation {
        &self.location
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<f64> {
        &self.accum
    }

    /// Accumulated time axis (s).
    pub fn times(&self) -> &RunArray<f64> {
        self.accum.refs()
    }
}

impl Output for AccelerationOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        invoke_time_series(
            &mut self.accum,
            &self.location,
            calc,
            name,
            |calc, loc| calc.accel_tf(&calc.input_location(), loc),
            |_, _, _, series| series,
        )
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

/// Arias-intensity time history at a location.
///
/// The cumulative trapezoidal integral of the squared acceleration leaves one
/// fewer sample than the acceleration history for the same run.
#[derive(Debug, Clone)]
pub struct AriasIntensityOutput {
    location: OutputLocation,
    accum: Accumulator<f64>,
}

impl AriasIntensityOutput {
    /// Output at `location`.
    pub fn new(location: OutputLocation) -> Self {
        Self {
            location,
            accum: Accumulator::new(),
        }
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

impl Output for AriasIntensityOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        invoke_time_series(
            &mut self.accum,
            &self.location,
            calc,
            name,
            |calc, loc| calc.accel_tf(&calc.input_location(), loc),
            |_, time_step, _, series| {
                let squared = series.map(|a| a * a);
                cumulative_trapezoid(&squared, time_step) * (GRAVITY * PI / 2.0)
            },
        )
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

/// Shear-strain time history at an in-medium location.
#[derive(Debug, Clone)]
pub struct StrainOutput {
    location: OutputLocation,
    in_percent: bool,
    accum: Accumulator<f64>,
}

impl StrainOutput {
    /// Output at `location`, which must sample the `within` wave field.
    pub fn new(location: OutputLocation) -> Result<Self> {
        require_within("strain", &location)?;
        Ok(Self {
            location,
            in_percent: false,
            accum: Accumulator::new(),
        })
    }

    /// Report strain in percent instead of decimal.
    pub fn with_percent(mut self, in_percent: bool) -> Self {
        self.in_percent = in_percent;
        self
    }

    /// Whether values are reported in percent.
    pub fn in_percent(&self) -> bool {
        self.in_percent
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

impl Output for StrainOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let in_percent = self.in_percent;
        invoke_time_series(
            &mut self.accum,
            &self.location,
            calc,
            name,
            |calc, loc| calc.strain_tf(&calc.input_location(), loc),
            move |_, _, _, series| if in_percent { series * 100.0 } else { series },
        )
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

/// Shear-stress time history at an in-medium location.
#[derive(Debug, Clone)]
pub struct StressOutput {
    location: OutputLocation,
    damped: bool,
    normalized: bool,
    accum: Accumulator<f64>,
}

impl StressOutput {
    /// Output at `location`, which must sample the `within` wave field.
    pub fn new(location: OutputLocation) -> Result<Self> {
        require_within("stress", &location)?;
        Ok(Self {
            location,
            damped: false,
            normalized: false,
            accum: Accumulator::new(),
        })
    }

    /// Use the damped shear-stress response.
    pub fn with_damped(mut self, damped: bool) -> Self {
        self.damped = damped;
        self
    }

    /// Normalize by the effective vertical stress at the sampled depth.
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Whether the damped response is requested.
    pub fn damped(&self) -> bool {
        self.damped
    }

    /// Whether values are stress ratios instead of stresses.
    pub fn normalized(&self) -> bool {
        self.normalized
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

impl Output for StressOutput {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let damped = self.damped;
        let normalized = self.normalized;
        invoke_time_series(
            &mut self.accum,
            &self.location,
            calc,
            name,
            move |calc, loc| {
                let tf = calc.stress_tf(&calc.input_location(), loc, damped);
                if normalized {
                    // Correct by the effective vertical stress at depth,
                    // before synthesis
                    let layer = &calc.profile()[loc.index()];
                    let stress_vert = layer.stress_vert(loc.depth() - layer.depth(), true);
                    tf.map(|h| h / stress_vert)
                } else {
                    tf
                }
            },
            |_, _, _, series| series,
        )
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

/// Cumulative trapezoidal integral over a uniformly sampled series.
///
/// Returns one value per interval, so the result is one sample shorter than
/// the input.
fn cumulative_trapezoid(values: &DVector<f64>, dx: f64) -> DVector<f64> {
    let n = values.len().saturating_sub(1);
    let mut out = DVector::zeros(n);
    let mut total = 0.0;
    for i in 0..n {
        total += dx * (values[i] + values[i + 1]) / 2.0;
        out[i] = total;
    }
    out
}
