//! Neighbourhood analyzers assigning a type to learning examples.
//!
//! An analyzer compares a *minority* set of objects against a *majority*
//! set, and assigns each minority object a `LearningExampleType`
//! depending on how pure its neighbourhood is. Neighbours are searched
//! among all objects of the table, using a precomputed `DistanceArray`;
//! objects outside both sets still take up places in a neighbourhood.
//!
//! Two strategies are available: counting same-class objects among the
//! k nearest neighbours (`KNN`, `MutualKNN`), or estimating the share of
//! minority density with an Epanechnikov kernel (`Kernel`).
pub mod kernel;
pub mod knn;

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde_derive::Serialize;

use crate::data::{Decision, InformationTable};
use crate::error::{Error, Result};
use crate::measure::DistanceArray;

pub use self::kernel::{Kernel, KernelParams};
pub use self::knn::{KnnParams, MutualKNN, KNN};

/// Type of a learning example, ordered by how safe it is
/// (`Outlier < Rare < Borderline < Safe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningExampleType {
    Outlier,
    Rare,
    Borderline,
    Safe,
}

impl LearningExampleType {
    pub const ALL: [LearningExampleType; 4] = [LearningExampleType::Safe,
                                               LearningExampleType::Borderline,
                                               LearningExampleType::Rare,
                                               LearningExampleType::Outlier];

    pub fn as_str(&self) -> &'static str {
        match *self {
            LearningExampleType::Safe => "SAFE",
            LearningExampleType::Borderline => "BORDERLINE",
            LearningExampleType::Rare => "RARE",
            LearningExampleType::Outlier => "OUTLIER",
        }
    }
}

impl fmt::Display for LearningExampleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types assigned to minority objects, keyed by object index.
pub type Assignment = BTreeMap<usize, LearningExampleType>;

/// An object near some example.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub index: usize,
    pub distance: f64,
}

/// The objects an analyzer works on: a majority and a minority set of
/// some information table, and the distances between its objects.
#[derive(Debug, Clone)]
pub struct Neighbourhood<'a> {
    table: &'a InformationTable,
    distances: &'a DistanceArray,
    majority: Vec<usize>,
    minority: Vec<usize>,
}

impl<'a> Neighbourhood<'a> {
    /// Constructs a neighbourhood.
    ///
    /// # Arguments
    ///
    /// * `table` - Information table the objects belong to.
    /// * `distances` - Distances between all objects of `table`.
    /// * `majority` - Indices of majority objects.
    /// * `minority` - Indices of minority objects; these are the ones
    ///                analyzers assign a type to.
    pub fn new(table: &'a InformationTable, distances: &'a DistanceArray,
               majority: &[usize], minority: &[usize]) -> Result<Neighbourhood<'a>> {
        let n_objects = table.n_objects();

        if distances.len() != n_objects {
            return Err(Error::InvalidParameter(
                format!("distance array covers {} objects but the table has {}",
                        distances.len(), n_objects)));
        }
        if let Some(&index) = majority.iter().chain(minority).find(|&&i| i >= n_objects) {
            return Err(Error::IndexOutOfRange { index, len: n_objects });
        }

        Ok(Neighbourhood {
            table,
            distances,
            majority: majority.to_vec(),
            minority: minority.to_vec(),
        })
    }

    pub fn table(&self) -> &'a InformationTable {
        self.table
    }

    pub fn distances(&self) -> &'a DistanceArray {
        self.distances
    }

    pub fn majority(&self) -> &[usize] {
        &self.majority
    }

    pub fn minority(&self) -> &[usize] {
        &self.minority
    }

    pub fn decision(&self, object: usize) -> &'a Decision {
        self.table.decision(object)
    }

    /// All objects of the table other than `example`, from the nearest to
    /// the farthest; ties are broken by index.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate ordinal_neighbours;
    ///
    /// # fn main() {
    /// use ordinal_neighbours::analyzer::Neighbourhood;
    /// use ordinal_neighbours::data::InformationTable;
    /// use ordinal_neighbours::measure::{DistanceArray, Hvdm};
    ///
    /// let inputs = array![[0.], [5.], [1.], [2.]];
    /// let targets = array![0, 0, 1, 1];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .unwrap();
    /// let distances = DistanceArray::new(&Hvdm::new(&table));
    /// let neighbourhood = Neighbourhood::new(&table, &distances, &[0, 1], &[2, 3])
    ///                                   .unwrap();
    ///
    /// let ranked = neighbourhood.ranked_neighbours(2)
    ///                           .iter()
    ///                           .map(|n| n.index)
    ///                           .collect::<Vec<_>>();
    /// assert_eq!(ranked, vec![0, 3, 1]);
    /// # }
    /// ```
    pub fn ranked_neighbours(&self, example: usize) -> Vec<Neighbour> {
        (0..self.table.n_objects()).filter(|&i| i != example)
                                   .map(|i| Neighbour { index: i,
                                                        distance: self.distances.get(example, i) })
                                   .sorted_by_key(|n| (OrderedFloat(n.distance), n.index))
                                   .collect()
    }
}

/// A strategy assigning types to the minority objects of a
/// `Neighbourhood`.
pub trait ExampleLabeler {
    fn neighbourhood(&self) -> &Neighbourhood<'_>;

    /// Type of the `example`-th object.
    fn label_example(&self, example: usize) -> LearningExampleType;

    /// Types of all minority objects.
    fn label_all(&self) -> Assignment {
        self.neighbourhood()
            .minority()
            .iter()
            .map(|&i| (i, self.label_example(i)))
            .collect()
    }
}
