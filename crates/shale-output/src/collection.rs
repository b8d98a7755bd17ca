//! Ordered aggregate of outputs invoked per run.

use log::debug;

use shale_core::{ResponseCalc, Result};

use crate::output::Output;

/// Ordered list of outputs; insertion order is invocation and report order.
///
/// The collection only broadcasts. Cross-scenario orchestration belongs to
/// the external driver.
#[derive(Default)]
pub struct OutputCollection {
    outputs: Vec<Box<dyn Output>>,
}

impl OutputCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output.
    pub fn push(&mut self, output: Box<dyn Output>) {
        self.outputs.push(output);
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the collection holds no outputs.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Iterate outputs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Output> {
        self.outputs.iter().map(|o| o.as_ref())
    }

    /// Iterate outputs mutably, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Output>> {
        self.outputs.iter_mut()
    }

    /// Capture the completed run in every output, in insertion order.
    pub fn invoke(&mut self, calc: &dyn ResponseCalc, name: Option<&str>) -> Result<()> {
        debug!(
            "capturing run {} across {} outputs",
            name.unwrap_or("<unnamed>"),
            self.outputs.len()
        );
        for output in &mut self.outputs {
            output.invoke(calc, name)?;
        }
        Ok(())
    }

    /// Reset every output.
    pub fn reset(&mut self) {
        for output in &mut self.outputs {
            output.reset();
        }
    }
}

impl std::ops::Index<usize> for OutputCollection {
    type Output = dyn Output;

    fn index(&self, index: usize) -> &Self::Output {
        self.outputs[index].as_ref()
    }
}

impl FromIterator<Box<dyn Output>> for OutputCollection {
    fn from_iter<I: IntoIterator<Item = Box<dyn Output>>>(iter: I) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

impl Extend<Box<dyn Output>> for OutputCollection {
    fn extend<I: IntoIterator<Item = Box<dyn Output>>>(&mut self, iter: I) {
        self.outputs.extend(iter);
    }
}
