//! Interface to a completed wave-propagation solution.

use nalgebra::DVector;
use num_complex::Complex;

use crate::motion::Motion;
use crate::profile::{Location, Profile};

/// A completed site-response calculation, as queried by the output layer.
///
/// Implemented by the wave-propagation solver. Every method reflects the
/// state of the most recent run; outputs are invoked synchronously after the
/// run completes. The trait is dyn-compatible so heterogeneous output
/// collections can share one calculator reference.
pub trait ResponseCalc {
    /// Profile used by the current run.
    fn profile(&self) -> &Profile;

    /// Input motion of the current run.
    fn motion(&self) -> &Motion;

    /// Designated input location of the calculation.
    fn input_location(&self) -> Location;

    /// Complex acceleration transfer function between two locations, sampled
    /// on the motion's frequency grid.
    fn accel_tf(&self, from: &Location, to: &Location) -> DVector<Complex<f64>>;

    /// Complex shear-strain transfer function between two locations.
    fn strain_tf(&self, from: &Location, to: &Location) -> DVector<Complex<f64>>;

    /// Complex shear-stress transfer function between two locations, with or
    /// without damping.
    fn stress_tf(&self, from: &Location, to: &Location, damped: bool) -> DVector<Complex<f64>>;

    /// Synthesize a time-domain series from a transfer function via the
    /// motion.
    fn time_series(&self, tf: &DVector<Complex<f64>>) -> DVector<f64>;

    /// Peak single-degree-of-freedom oscillator accelerations at the given
    /// natural frequencies (Hz) and damping ratio (decimal).
    fn osc_accels(
        &self,
        freqs: &DVector<f64>,
        osc_damping: f64,
        tf: &DVector<Complex<f64>>,
    ) -> DVector<f64>;
}
