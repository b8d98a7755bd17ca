//! Ragged-array merge utility.
//!
//! Result vectors from successive runs can differ in length. Accumulation
//! keeps them aligned by padding the shorter operand's tail with a
//! missing-value sentinel and stacking runs as columns.

use nalgebra::{DMatrix, DVector, Scalar};
use num_complex::Complex;

/// Scalar type that admits the missing-value sentinel.
///
/// The sentinel marks cells created by ragged padding. It is distinguishable
/// from every legitimate result value and is never treated as data by
/// downstream consumers.
pub trait MergeScalar: Scalar + Copy {
    /// The missing-value sentinel.
    fn missing() -> Self;

    /// Whether this cell holds the sentinel.
    fn is_missing(&self) -> bool;
}

impl MergeScalar for f64 {
    fn missing() -> Self {
        f64::NAN
    }

    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl MergeScalar for Complex<f64> {
    fn missing() -> Self {
        Complex::new(f64::NAN, f64::NAN)
    }

    fn is_missing(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}

/// Accumulated result storage: nothing, one run, or one column per run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunArray<T: MergeScalar> {
    /// No runs accumulated.
    Empty,
    /// A single run, kept 1-D.
    One(DVector<T>),
    /// Two or more runs stacked as columns.
    Many(DMatrix<T>),
}

impl<T: MergeScalar> RunArray<T> {
    /// Number of accumulated columns (runs).
    pub fn ncols(&self) -> usize {
        match self {
            RunArray::Empty => 0,
            RunArray::One(_) => 1,
            RunArray::Many(m) => m.ncols(),
        }
    }

    /// Number of rows (samples, after any padding).
    pub fn nrows(&self) -> usize {
        match self {
            RunArray::Empty => 0,
            RunArray::One(v) => v.len(),
            RunArray::Many(m) => m.nrows(),
        }
    }

    /// Whether no runs have been accumulated.
    pub fn is_empty(&self) -> bool {
        matches!(self, RunArray::Empty)
    }

    /// Copy of column `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn column(&self, i: usize) -> DVector<T> {
        match self {
            RunArray::Empty => panic!("column {i} of an empty run array"),
            RunArray::One(v) => {
                assert_eq!(i, 0, "column {i} of a single-run array");
                v.clone()
            }
            RunArray::Many(m) => m.column(i).into_owned(),
        }
    }
}

impl<T: MergeScalar> Default for RunArray<T> {
    fn default() -> Self {
        RunArray::Empty
    }
}

/// Append `incoming` to `existing` as a new trailing column, padding the
/// shorter operand's tail with the missing-value sentinel.
///
/// An empty `existing` yields `incoming` unchanged, still 1-D. Otherwise the
/// result is 2-D with `existing.ncols() + 1` columns and
/// `max(existing.nrows(), incoming.len())` rows.
pub fn merge_append<T: MergeScalar>(existing: &RunArray<T>, incoming: DVector<T>) -> RunArray<T> {
    let existing = match existing {
        RunArray::Empty => return RunArray::One(incoming),
        RunArray::One(v) => DMatrix::from_columns(&[v.clone()]),
        RunArray::Many(m) => m.clone(),
    };

    let nrows = existing.nrows().max(incoming.len());
    let mut merged = DMatrix::from_element(nrows, existing.ncols() + 1, T::missing());
    merged
        .view_mut((0, 0), (existing.nrows(), existing.ncols()))
        .copy_from(&existing);
    merged
        .view_mut((0, existing.ncols()), (incoming.len(), 1))
        .copy_from(&incoming);
    RunArray::Many(merged)
}
