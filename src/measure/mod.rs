//! Dissimilarity measures between objects of an information table.
//!
//! A `Measure` computes the distance between two objects given their
//! indices. `Hvdm` is the Heterogeneous Value Difference Metric, which
//! handles numeric, nominal and missing values; `DistanceArray` caches
//! all pairwise distances of a measure.
pub mod distances;
pub mod hvdm;
pub mod stats;

pub use self::distances::DistanceArray;
pub use self::hvdm::Hvdm;
pub use self::stats::{AttributeStats, NominalStats, NumericStats};

/// A symmetric, non-negative dissimilarity between objects.
pub trait Measure: Sync {
    /// Number of objects the measure is defined on.
    fn n_objects(&self) -> usize;
    /// Distance between the `x`-th and the `y`-th object.
    ///
    /// # Panics
    ///
    /// If either index is not smaller than `n_objects()`.
    fn distance(&self, x: usize, y: usize) -> f64;
}
