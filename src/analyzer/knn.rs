//! k-NN analyzers.
use log::trace;

use crate::analyzer::{ExampleLabeler, LearningExampleType, Neighbour, Neighbourhood};
use crate::error::{Error, Result};

/// Number of neighbours and same-class thresholds of a k-NN analyzer.
///
/// An example with at least `safe` same-class objects among its `k`
/// nearest neighbours is safe; otherwise borderline with at least
/// `borderline`, rare with at least `rare`, and an outlier below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnParams {
    pub k: usize,
    pub safe: usize,
    pub borderline: usize,
    pub rare: usize,
}

impl Default for KnnParams {
    fn default() -> KnnParams {
        KnnParams { k: 5, safe: 4, borderline: 2, rare: 1 }
    }
}

impl KnnParams {
    /// Checks the parameters for a table of `n_objects` objects.
    ///
    /// `k` must be positive and at most `n_objects`; thresholds must be
    /// at most `k` and strictly decreasing.
    pub fn validate(&self, n_objects: usize) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter("k must be positive".to_string()));
        }
        if self.k > n_objects {
            return Err(Error::InvalidParameter(
                format!("k = {} exceeds the number of objects ({})", self.k, n_objects)));
        }
        if self.safe > self.k {
            return Err(Error::InvalidParameter(
                format!("safe threshold {} exceeds k = {}", self.safe, self.k)));
        }
        if !(self.safe > self.borderline && self.borderline > self.rare) {
            return Err(Error::InvalidParameter(
                format!("k-NN thresholds must be strictly decreasing, got {}/{}/{}",
                        self.safe, self.borderline, self.rare)));
        }
        Ok(())
    }

    /// Type of an example with `same_class` same-class neighbours.
    pub fn label(&self, same_class: usize) -> LearningExampleType {
        match same_class {
            n if n >= self.safe => LearningExampleType::Safe,
            n if n >= self.borderline => LearningExampleType::Borderline,
            n if n >= self.rare => LearningExampleType::Rare,
            _ => LearningExampleType::Outlier,
        }
    }
}

/// The `k` nearest neighbours of `example`.
fn k_nearest(neighbourhood: &Neighbourhood, k: usize, example: usize) -> Vec<Neighbour> {
    let mut ranked = neighbourhood.ranked_neighbours(example);
    ranked.truncate(k);
    ranked
}

/// Indices of the objects among the `k` nearest neighbours of `example`
/// sharing its decision, nearest first.
fn same_class_neighbours(neighbourhood: &Neighbourhood, k: usize, example: usize) -> Vec<usize> {
    let decision = neighbourhood.decision(example);

    k_nearest(neighbourhood, k, example).into_iter()
                                        .map(|n| n.index)
                                        .filter(|&i| neighbourhood.decision(i) == decision)
                                        .collect()
}

/// k-NN analyzer counting same-class objects among the k nearest
/// neighbours of each minority example.
///
/// # Examples
///
/// ```
/// #[macro_use(array)]
/// extern crate ndarray;
/// extern crate ordinal_neighbours;
///
/// # fn main() {
/// use ordinal_neighbours::analyzer::*;
/// use ordinal_neighbours::data::InformationTable;
/// use ordinal_neighbours::measure::{DistanceArray, Hvdm};
///
/// let inputs = array![[0.], [1.], [2.], [10.], [11.], [12.]];
/// let targets = array![1, 1, 1, 0, 0, 0];
/// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
///                              .unwrap();
/// let distances = DistanceArray::new(&Hvdm::new(&table));
/// let neighbourhood = Neighbourhood::new(&table, &distances, &[3, 4, 5], &[0, 1, 2])
///                                   .unwrap();
/// let params = KnnParams { k: 3, safe: 2, borderline: 1, rare: 0 };
///
/// let knn = KNN::new(neighbourhood, params).expect("Invalid parameters");
/// let labels = knn.label_all();
/// assert!(labels.values().all(|&t| t == LearningExampleType::Safe));
/// # }
/// ```
pub struct KNN<'a> {
    neighbourhood: Neighbourhood<'a>,
    params: KnnParams,
}

impl<'a> KNN<'a> {
    /// Constructs a k-NN analyzer, failing if `params` are invalid for
    /// the neighbourhood's table.
    pub fn new(neighbourhood: Neighbourhood<'a>, params: KnnParams) -> Result<KNN<'a>> {
        params.validate(neighbourhood.table().n_objects())?;

        Ok(KNN { neighbourhood, params })
    }

    /// Number of objects among the k nearest neighbours of `example`
    /// having the same decision.
    pub fn same_class_amount(&self, example: usize) -> usize {
        same_class_neighbours(&self.neighbourhood, self.params.k, example).len()
    }
}

impl<'a> ExampleLabeler for KNN<'a> {
    fn neighbourhood(&self) -> &Neighbourhood<'_> {
        &self.neighbourhood
    }

    fn label_example(&self, example: usize) -> LearningExampleType {
        self.params.label(self.same_class_amount(example))
    }
}

/// k-NN analyzer telling isolated pairs apart from loose groups.
///
/// Labels like `KNN`, except when the number of same-class neighbours
/// equals the `rare` threshold: then the nearest same-class neighbour is
/// inspected. If its own nearest same-class neighbour is the example
/// (or it has none), the example is rare; otherwise the example belongs
/// to a larger, loosely connected group and is borderline.
pub struct MutualKNN<'a> {
    neighbourhood: Neighbourhood<'a>,
    params: KnnParams,
}

impl<'a> MutualKNN<'a> {
    pub fn new(neighbourhood: Neighbourhood<'a>, params: KnnParams) -> Result<MutualKNN<'a>> {
        params.validate(neighbourhood.table().n_objects())?;

        Ok(MutualKNN { neighbourhood, params })
    }

    fn rare_example_check(&self, example: usize, neighbour: usize) -> LearningExampleType {
        let neighbour_same = same_class_neighbours(&self.neighbourhood, self.params.k, neighbour);

        match neighbour_same.first() {
            Some(&nearest) if nearest != example => {
                trace!("object {}: neighbour {} points to {}, not rare", example, neighbour,
                       nearest);
                LearningExampleType::Borderline
            }
            _ => LearningExampleType::Rare,
        }
    }
}

impl<'a> ExampleLabeler for MutualKNN<'a> {
    fn neighbourhood(&self) -> &Neighbourhood<'_> {
        &self.neighbourhood
    }

    fn label_example(&self, example: usize) -> LearningExampleType {
        let same = same_class_neighbours(&self.neighbourhood, self.params.k, example);

        if same.len() == self.params.rare {
            match same.first() {
                Some(&neighbour) => self.rare_example_check(example, neighbour),
                None => LearningExampleType::Rare,
            }
        } else {
            self.params.label(same.len())
        }
    }
}
