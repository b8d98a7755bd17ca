//! Symbolic sampling positions resolved against a profile at invocation time.

use serde::{Deserialize, Serialize};

use shale_core::{Location, Profile, Result, WaveField};

/// Immutable descriptor of a sampling position.
///
/// Holds a wave-field kind plus a depth or a layer index. Resolution against
/// a concrete profile is deferred to invocation, so one descriptor serves
/// scenarios whose layering differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputLocation {
    wave_field: WaveField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl OutputLocation {
    /// Descriptor addressed by depth (m).
    pub fn with_depth(wave_field: WaveField, depth: f64) -> Self {
        Self {
            wave_field,
            depth: Some(depth),
            index: None,
        }
    }

    /// Descriptor addressed by layer index.
    pub fn with_index(wave_field: WaveField, index: usize) -> Self {
        Self {
            wave_field,
            depth: None,
            index: Some(index),
        }
    }

    /// Configured wave field.
    pub fn wave_field(&self) -> WaveField {
        self.wave_field
    }

    /// Configured depth, if depth-addressed.
    pub fn depth(&self) -> Option<f64> {
        self.depth
    }

    /// Configured layer index, if index-addressed.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Resolve against a profile.
    ///
    /// Failures come from the profile's resolver unchanged.
    pub fn resolve(&self, profile: &Profile) -> Result<Location> {
        profile.location(self.wave_field, self.depth, self.index)
    }
}
