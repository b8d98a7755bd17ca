//! Depth-profile outputs over the non-terminal layers.
//!
//! The terminal layer is an unbounded half-space and is excluded from every
//! profile output. The depth axis per run is the surface plus the mid-depth
//! of each remaining layer, merged across runs since profiles may differ in
//! layer count between scenarios.

use nalgebra::DVector;

use shale_core::{Error, Profile, ResponseCalc, Result};

use crate::accumulator::Accumulator;
use crate::output::{Output, RunResult, real_results};

/// Reference stress level for the cyclic stress ratio
/// (Idriss and Boulanger, 2008).
const STRESS_LEVEL: f64 = 0.65;

/// Depth axis: the surface plus the mid-depth of every non-terminal layer.
fn profile_refs(profile: &Profile) -> DVector<f64> {
    let layers = profile.layers();
    let n = layers.len().saturating_sub(1);
    let mut refs = DVector::zeros(n + 1);
    for (i, layer) in layers[..n].iter().enumerate() {
        refs[i + 1] = layer.depth_mid();
    }
    refs
}

/// Peak shear strain of each non-terminal layer, by depth.
#[derive(Debug, Clone, Default)]
pub struct MaxStrainProfile {
    accum: Accumulator<f64>,
}

impl MaxStrainProfile {
    /// Empty profile output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<f64> {
        &self.accum
    }
}

impl Output for MaxStrainProfile {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let profile = calc.profile();
        let layers = profile.layers();
        let n = layers.len().saturating_sub(1);
        let mut values = DVector::zeros(n + 1);
        for (i, layer) in layers[..n].iter().enumerate() {
            values[i + 1] = layer.strain_max;
        }
        self.accum.record_name(name);
        self.accum.add_values(values);
        self.accum.add_refs(profile_refs(profile));
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

/// Cyclic stress ratio of each non-terminal layer, by depth.
///
/// Peak shear stress over the effective vertical stress at the layer's
/// mid-thickness, scaled to the reference stress level. The shallowest ratio
/// is repeated for the surface, where no layer exists above it.
#[derive(Debug, Clone, Default)]
pub struct CyclicStressRatioProfile {
    accum: Accumulator<f64>,
}

impl CyclicStressRatioProfile {
    /// Empty profile output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated state.
    pub fn accumulated(&self) -> &Accumulator<f64> {
        &self.accum
    }
}

impl Output for CyclicStressRatioProfile {
    fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        let profile = calc.profile();
        let layers = profile.layers();
        if layers.len() < 2 {
            return Err(Error::PreconditionViolation(
                "cyclic stress ratio requires a layer above the half-space".to_string(),
            ));
        }
        let n = layers.len() - 1;
        let mut values = DVector::zeros(n + 1);
        for (i, layer) in layers[..n].iter().enumerate() {
            let ratio = layer.stress_max / layer.stress_vert(layer.thickness / 2.0, true);
            values[i + 1] = STRESS_LEVEL * ratio;
        }
        // Repeat the shallowest ratio for the surface
        values[0] = values[1];
        self.accum.record_name(name);
        self.accum.add_values(values);
        self.accum.add_refs(profile_refs(profile));
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
