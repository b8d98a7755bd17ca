//! Layered site profile and location resolution.

use std::ops::Index;

use crate::error::{Error, Result};
use crate::wave::WaveField;

/// Unit weight of water (kN/m³), for the pore-pressure correction.
pub const UNIT_WT_WATER: f64 = 9.81;

/// A single soil or rock layer.
///
/// Peak strain and stress are written back by the solver after each run. The
/// depth to the layer top and the overburden stress at the top are derived
/// when the layer is placed into a [`Profile`].
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer thickness (m).
    pub thickness: f64,
    /// Total unit weight (kN/m³).
    pub unit_wt: f64,
    /// Peak shear strain (decimal) from the most recent run.
    pub strain_max: f64,
    /// Peak shear stress (kPa) from the most recent run.
    pub stress_max: f64,
    depth: f64,
    stress_vert_top: f64,
    depth_water: f64,
}

impl Layer {
    /// Create a layer with no recorded peak response.
    pub fn new(thickness: f64, unit_wt: f64) -> Self {
        Self {
            thickness,
            unit_wt,
            strain_max: 0.0,
            stress_max: 0.0,
            depth: 0.0,
            stress_vert_top: 0.0,
            depth_water: f64::INFINITY,
        }
    }

    /// Depth to the top of the layer (m).
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Depth to the middle of the layer (m).
    pub fn depth_mid(&self) -> f64 {
        self.depth + self.thickness / 2.0
    }

    /// Vertical stress (kPa) at `sub_depth` below the top of the layer.
    ///
    /// With `effective`, hydrostatic pore pressure below the water table is
    /// subtracted from the total overburden.
    pub fn stress_vert(&self, sub_depth: f64, effective: bool) -> f64 {
        let mut stress = self.stress_vert_top + self.unit_wt * sub_depth;
        if effective {
            let depth = self.depth + sub_depth;
            if depth > self.depth_water {
                stress -= UNIT_WT_WATER * (depth - self.depth_water);
            }
        }
        stress
    }
}

/// A resolved sampling position within a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    index: usize,
    depth: f64,
    wave_field: WaveField,
}

impl Location {
    /// Index of the containing layer.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Depth of the sampling position (m).
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Wave field sampled at this position.
    pub fn wave_field(&self) -> WaveField {
        self.wave_field
    }
}

/// Ordered stack of layers over an unbounded half-space.
///
/// The last layer is the terminus; depth-profile outputs exclude it.
#[derive(Debug, Clone)]
pub struct Profile {
    layers: Vec<Layer>,
    depth_water: Option<f64>,
}

impl Profile {
    /// Build a profile, assigning each layer its depth and overburden.
    pub fn new(mut layers: Vec<Layer>, depth_water: Option<f64>) -> Self {
        let mut depth = 0.0;
        let mut stress = 0.0;
        for layer in &mut layers {
            layer.depth = depth;
            layer.stress_vert_top = stress;
            layer.depth_water = depth_water.unwrap_or(f64::INFINITY);
            depth += layer.thickness;
            stress += layer.unit_wt * layer.thickness;
        }
        Self {
            layers,
            depth_water,
        }
    }

    /// Layers in depth order, terminus last.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable layers, for the solver to write peak responses back.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Number of layers, terminus included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the profile has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Water-table depth (m), if saturated below some depth.
    pub fn depth_water(&self) -> Option<f64> {
        self.depth_water
    }

    /// Resolve a wave field and depth-or-index to a concrete location.
    ///
    /// `index` wins when both addresses are given. A depth at or below the
    /// top of the terminal layer resolves to the terminus.
    pub fn location(
        &self,
        wave_field: WaveField,
        depth: Option<f64>,
        index: Option<usize>,
    ) -> Result<Location> {
        if let Some(index) = index {
            match self.layers.get(index) {
                Some(layer) => Ok(Location {
                    index,
                    depth: layer.depth,
                    wave_field,
                }),
                None => Err(Error::UnresolvedLocation {
                    wave_field,
                    target: format!("index {index}"),
                }),
            }
        } else if let Some(depth) = depth {
            if depth < 0.0 || self.layers.is_empty() {
                return Err(Error::UnresolvedLocation {
                    wave_field,
                    target: format!("depth {depth} m"),
                });
            }
            let index = self
                .layers
                .iter()
                .position(|l| depth < l.depth + l.thickness)
                .unwrap_or(self.layers.len() - 1);
            Ok(Location {
                index,
                depth,
                wave_field,
            })
        } else {
            Err(Error::UnresolvedLocation {
                wave_field,
                target: "no depth or index".to_string(),
            })
        }
    }
}

impl Index<usize> for Profile {
    type Output = Layer;

    fn index(&self, index: usize) -> &Layer {
        &self.layers[index]
    }
}
