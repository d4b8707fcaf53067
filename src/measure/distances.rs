//! Cache of all pairwise distances between the objects of a table.
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::measure::Measure;

/// Precomputed distances between every pair of objects.
///
/// Only the lower triangle is stored: the distance between `x > y` is
/// found at `x * (x - 1) / 2 + y`. The distance of an object to itself
/// is 0 by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceArray {
    n_objects: usize,
    distances: Vec<f64>,
}

impl DistanceArray {
    /// Computes the distances between all pairs of objects known to
    /// `measure`.
    ///
    /// Rows of the triangle are computed in parallel; the result is the
    /// same as a sequential computation.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate ordinal_neighbours;
    ///
    /// # fn main() {
    /// use ordinal_neighbours::data::InformationTable;
    /// use ordinal_neighbours::measure::{DistanceArray, Hvdm};
    ///
    /// let inputs = array![[0.], [1.], [3.]];
    /// let targets = array![0, 0, 1];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .unwrap();
    /// let distances = DistanceArray::new(&Hvdm::new(&table));
    ///
    /// assert_eq!(distances.distance(2, 2).unwrap(), 0.);
    /// assert_eq!(distances.distance(0, 2).unwrap(),
    ///            distances.distance(2, 0).unwrap());
    /// assert!(distances.distance(0, 3).is_err());
    /// # }
    /// ```
    pub fn new<M: Measure>(measure: &M) -> DistanceArray {
        let n_objects = measure.n_objects();

        let distances = (1..n_objects).into_par_iter()
                                      .map(|x| (0..x).map(|y| measure.distance(x, y))
                                                     .collect::<Vec<_>>())
                                      .collect::<Vec<_>>()
                                      .concat();

        DistanceArray { n_objects, distances }
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.n_objects
    }

    pub fn is_empty(&self) -> bool {
        self.n_objects == 0
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.n_objects {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len: self.n_objects })
        }
    }

    /// Distance between the `x`-th and `y`-th object, in any order.
    pub fn distance(&self, x: usize, y: usize) -> Result<f64> {
        self.check(x)?;
        self.check(y)?;

        Ok(self.get(x, y))
    }

    /// Unchecked lookup; indices must be in range.
    pub(crate) fn get(&self, x: usize, y: usize) -> f64 {
        match x.cmp(&y) {
            std::cmp::Ordering::Equal => 0.,
            std::cmp::Ordering::Greater => self.distances[x * (x - 1) / 2 + y],
            std::cmp::Ordering::Less => self.distances[y * (y - 1) / 2 + x],
        }
    }

    /// Distances from the `x`-th object to every other object, keyed by
    /// object index.
    pub fn neighbour_distances(&self, x: usize) -> Result<BTreeMap<usize, f64>> {
        self.check(x)?;

        Ok((0..self.n_objects).filter(|&y| y != x)
                              .map(|y| (y, self.get(x, y)))
                              .collect())
    }
}
