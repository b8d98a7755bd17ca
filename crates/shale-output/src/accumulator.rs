//! Shared accumulation state composed by every output variant.

use log::debug;
use nalgebra::DVector;

use crate::merge::{MergeScalar, RunArray, merge_append};

/// Tolerance for deciding that a run's reference axis matches the stored one.
///
/// Compared per element as `|a - b| <= atol + rtol * |b|`. Runs whose axes
/// match keep sharing a single vector instead of going ragged.
#[derive(Debug, Clone, Copy)]
pub struct RefTolerance {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Default for RefTolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl RefTolerance {
    fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }
}

/// One accumulated result: reference axis, value columns, and run names.
///
/// The reference axis stays a single shared vector until a run disagrees in
/// length or value, after which it carries one column per run. Values are 1-D
/// after the first run and gain a column per subsequent run. The number of
/// names always equals the number of value columns.
#[derive(Debug, Clone)]
pub struct Accumulator<T: MergeScalar> {
    refs: RunArray<f64>,
    values: RunArray<T>,
    names: Vec<String>,
    const_refs: bool,
    ref_tol: RefTolerance,
}

impl<T: MergeScalar> Accumulator<T> {
    /// Accumulator whose reference axis is recomputed by each run.
    pub fn new() -> Self {
        Self {
            refs: RunArray::Empty,
            values: RunArray::Empty,
            names: Vec::new(),
            const_refs: false,
            ref_tol: RefTolerance::default(),
        }
    }

    /// Accumulator with a fixed reference axis that survives [`reset`].
    ///
    /// [`reset`]: Accumulator::reset
    pub fn with_const_refs(refs: DVector<f64>) -> Self {
        Self {
            refs: RunArray::One(refs),
            const_refs: true,
            ..Self::new()
        }
    }

    /// Override the reference-axis tolerance.
    pub fn with_ref_tolerance(mut self, ref_tol: RefTolerance) -> Self {
        self.ref_tol = ref_tol;
        self
    }

    /// Accumulated reference axis.
    pub fn refs(&self) -> &RunArray<f64> {
        &self.refs
    }

    /// Accumulated values.
    pub fn values(&self) -> &RunArray<T> {
        &self.values
    }

    /// Run names, one per accumulated column.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The shared reference vector, while the axis has not gone ragged.
    pub fn shared_refs(&self) -> Option<&DVector<f64>> {
        match &self.refs {
            RunArray::One(refs) => Some(refs),
            _ => None,
        }
    }

    /// Record the run name, generating the next default (`r1`, `r2`, …) when
    /// none is given.
    ///
    /// Call before [`add_values`] for the same run: the default is derived
    /// from the number of value columns already accumulated.
    ///
    /// [`add_values`]: Accumulator::add_values
    pub fn record_name(&mut self, name: Option<&str>) {
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("r{}", self.values.ncols() + 1),
        };
        self.names.push(name);
    }

    /// Accumulate a run's values: stored verbatim for the first run, merged
    /// into a per-run column for every later run.
    pub fn add_values(&mut self, values: DVector<T>) {
        let existing = std::mem::take(&mut self.values);
        self.values = merge_append(&existing, values);
    }

    /// Accumulate a run's reference axis.
    ///
    /// The first axis is stored verbatim. A later axis that matches the
    /// stored shared vector within tolerance is dropped. Anything else merges
    /// through [`merge_append`], and the axis carries one column per run from
    /// then on: the shared vector is first expanded to a column for every run
    /// that matched it.
    pub fn add_refs(&mut self, refs: DVector<f64>) {
        if let RunArray::One(stored) = &self.refs {
            if stored.len() == refs.len()
                && stored
                    .iter()
                    .zip(refs.iter())
                    .all(|(&a, &b)| self.ref_tol.close(a, b))
            {
                return;
            }
        }

        let shared_runs = self.shared_run_count();
        let existing = std::mem::take(&mut self.refs);
        self.refs = match existing {
            RunArray::Empty => RunArray::One(refs),
            RunArray::One(stored) => {
                debug!(
                    "reference axis disagrees after {} run(s), going ragged",
                    shared_runs
                );
                let mut ragged = RunArray::One(stored.clone());
                for _ in 1..shared_runs {
                    ragged = merge_append(&ragged, stored.clone());
                }
                merge_append(&ragged, refs)
            }
            many @ RunArray::Many(_) => merge_append(&many, refs),
        };
    }

    /// Runs that shared the stored reference vector so far.
    ///
    /// Derived from the value columns (the current run's column is already
    /// present when `add_refs` runs); falls back to the recorded names when
    /// the axis is driven without values.
    fn shared_run_count(&self) -> usize {
        if !self.values.is_empty() {
            self.values.ncols().saturating_sub(1).max(1)
        } else if self.names.len() > 1 {
            self.names.len() - 1
        } else {
            1
        }
    }

    /// Iterate `(name, refs, values)` per recorded run, in order.
    ///
    /// Derives fresh from the current state on every call: a shared reference
    /// axis is repeated for every run, a ragged one is read per column.
    pub fn iter_results(&self) -> impl Iterator<Item = (&str, DVector<f64>, DVector<T>)> + '_ {
        self.names.iter().enumerate().map(|(i, name)| {
            let refs = match &self.refs {
                RunArray::Empty => DVector::zeros(0),
                RunArray::One(refs) => refs.clone(),
                RunArray::Many(m) => m.column(i).into_owned(),
            };
            let values = match &self.values {
                RunArray::Empty => DVector::from_vec(Vec::new()),
                RunArray::One(values) => values.clone(),
                RunArray::Many(m) => m.column(i).into_owned(),
            };
            (name.as_str(), refs, values)
        })
    }

    /// Clear accumulated values and names; clear refs too unless constant.
    pub fn reset(&mut self) {
        self.values = RunArray::Empty;
        self.names.clear();
        if !self.const_refs {
            self.refs = RunArray::Empty;
        }
    }
}

impl<T: MergeScalar> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[f64]) -> DVector<f64> {
        DVector::from_row_slice(values)
    }

    #[test]
    fn default_names_follow_run_count() {
        let mut accum = Accumulator::<f64>::new();
        for _ in 0..3 {
            accum.record_name(None);
            accum.add_values(vector(&[1.0, 2.0]));
        }
        assert_eq!(accum.names(), &["r1", "r2", "r3"]);
    }

    #[test]
    fn default_name_crosses_one_to_two_dimensional_boundary() {
        let mut accum = Accumulator::<f64>::new();
        // No values yet
        accum.record_name(None);
        assert_eq!(accum.names().last().unwrap(), "r1");
        accum.add_values(vector(&[1.0]));
        // Values are 1-D
        accum.record_name(None);
        assert_eq!(accum.names().last().unwrap(), "r2");
        accum.add_values(vector(&[2.0]));
        // Values are 2-D with two columns
        accum.record_name(None);
        assert_eq!(accum.names().last().unwrap(), "r3");
    }

    #[test]
    fn explicit_names_are_kept() {
        let mut accum = Accumulator::<f64>::new();
        accum.record_name(Some("eq-a"));
        accum.record_name(None);
        assert_eq!(accum.names(), &["eq-a", "r1"]);
    }

    #[test]
    fn matching_refs_stay_shared() {
        let mut accum = Accumulator::<f64>::new();
        accum.add_refs(vector(&[0.0, 1.0, 2.0]));
        accum.add_refs(vector(&[0.0, 1.0, 2.0]));
        assert_eq!(accum.shared_refs().unwrap(), &vector(&[0.0, 1.0, 2.0]));
    }

    #[test]
    fn near_refs_within_tolerance_stay_shared() {
        let mut accum = Accumulator::<f64>::new();
        accum.add_refs(vector(&[0.0, 1.0, 2.0]));
        accum.add_refs(vector(&[0.0, 1.0 + 1e-9, 2.0]));
        assert!(accum.shared_refs().is_some());
    }

    #[test]
    fn diverging_refs_go_ragged_with_a_column_per_run() {
        let mut accum = Accumulator::<f64>::new();
        for _ in 0..2 {
            accum.record_name(None);
            accum.add_values(vector(&[1.0, 2.0, 3.0]));
            accum.add_refs(vector(&[0.0, 1.0, 2.0]));
        }
        accum.record_name(None);
        accum.add_values(vector(&[4.0, 5.0]));
        accum.add_refs(vector(&[0.0, 0.5]));

        let RunArray::Many(refs) = accum.refs() else {
            panic!("expected a ragged reference axis");
        };
        assert_eq!(refs.ncols(), 3);
        assert_eq!(refs.column(0), refs.column(1));
        assert_eq!(refs[(0, 2)], 0.0);
        assert_eq!(refs[(1, 2)], 0.5);
        assert!(refs[(2, 2)].is_nan());
    }

    #[test]
    fn values_merge_with_sentinel_padding() {
        let mut accum = Accumulator::<f64>::new();
        accum.add_values(vector(&[1.0, 2.0, 3.0]));
        accum.add_values(vector(&[4.0, 5.0]));

        let RunArray::Many(values) = accum.values() else {
            panic!("expected two value columns");
        };
        assert_eq!(values.shape(), (3, 2));
        assert_eq!(values[(0, 0)], 1.0);
        assert_eq!(values[(1, 0)], 2.0);
        assert_eq!(values[(2, 0)], 3.0);
        assert_eq!(values[(0, 1)], 4.0);
        assert_eq!(values[(1, 1)], 5.0);
        assert!(values[(2, 1)].is_nan());
    }

    #[test]
    fn iter_results_shares_a_common_axis() {
        let mut accum = Accumulator::<f64>::new();
        for _ in 0..2 {
            accum.record_name(None);
            accum.add_values(vector(&[1.0, 2.0]));
            accum.add_refs(vector(&[0.0, 0.1]));
        }

        let results: Vec<_> = accum.iter_results().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "r1");
        assert_eq!(results[1].0, "r2");
        assert_eq!(results[0].1, results[1].1);
        // Restartable: a second pass sees the same sequence
        assert_eq!(accum.iter_results().count(), 2);
    }

    #[test]
    fn iter_results_indexes_ragged_columns() {
        let mut accum = Accumulator::<f64>::new();
        accum.record_name(None);
        accum.add_values(vector(&[1.0, 2.0]));
        accum.add_refs(vector(&[0.0, 0.1]));
        accum.record_name(None);
        accum.add_values(vector(&[3.0, 4.0, 5.0]));
        accum.add_refs(vector(&[0.0, 0.2, 0.4]));

        let results: Vec<_> = accum.iter_results().collect();
        assert_eq!(results[0].1.len(), 3);
        assert!(results[0].1[2].is_nan());
        assert_eq!(results[1].1, vector(&[0.0, 0.2, 0.4]));
        assert_eq!(results[1].2, vector(&[3.0, 4.0, 5.0]));
    }

    #[test]
    fn reset_clears_everything_without_const_refs() {
        let mut accum = Accumulator::<f64>::new();
        accum.record_name(None);
        accum.add_values(vector(&[1.0]));
        accum.add_refs(vector(&[0.0]));
        accum.reset();
        assert!(accum.values().is_empty());
        assert!(accum.refs().is_empty());
        assert!(accum.names().is_empty());
    }

    #[test]
    fn reset_preserves_const_refs() {
        let mut accum = Accumulator::<f64>::with_const_refs(vector(&[1.0, 5.0, 10.0]));
        accum.record_name(None);
        accum.add_values(vector(&[0.1, 0.2, 0.3]));
        accum.reset();
        assert!(accum.values().is_empty());
        assert!(accum.names().is_empty());
        assert_eq!(accum.shared_refs().unwrap(), &vector(&[1.0, 5.0, 10.0]));
    }
}
