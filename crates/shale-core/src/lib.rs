//! Core types for the Shale one-dimensional site-response workspace.
//!
//! This crate defines the layered site model, the input-motion kinds, and the
//! [`ResponseCalc`] interface through which the output layer queries a
//! completed wave-propagation solution.
//!
//! # Module Structure
//!
//! - [`wave`] - Wave-field kinds for locating a response in the medium
//! - [`motion`] - Input-motion representation at the interface boundary
//! - [`profile`] - Layered site profile and location resolution
//! - [`calc`] - Interface to a completed calculation
//! - [`error`] - Error taxonomy shared across the workspace

pub mod calc;
pub mod error;
pub mod motion;
pub mod profile;
pub mod wave;

pub use calc::ResponseCalc;
pub use error::{Error, Result};
pub use motion::{GRAVITY, Motion, MotionKind};
pub use profile::{Layer, Location, Profile, UNIT_WT_WATER};
pub use wave::WaveField;
