//! Kernel density ratio analyzer.
use log::debug;

use crate::analyzer::{ExampleLabeler, LearningExampleType, Neighbourhood};
use crate::data::Decision;
use crate::error::{Error, Result};

/// Ratio thresholds of a kernel analyzer, and the neighbour used to
/// estimate its width.
///
/// An example whose minority density ratio is greater than `safe` is safe;
/// otherwise borderline if greater than `borderline`, rare if greater
/// than `rare`, and an outlier below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    pub safe: f64,
    pub borderline: f64,
    pub rare: f64,
    /// The kernel width is the mean distance from each minority example
    /// to its `bandwidth_neighbour`-th nearest neighbour.
    pub bandwidth_neighbour: usize,
}

impl Default for KernelParams {
    fn default() -> KernelParams {
        KernelParams { safe: 0.7, borderline: 0.3, rare: 0.1, bandwidth_neighbour: 5 }
    }
}

impl KernelParams {
    /// Checks that thresholds lie in (0, 1) and are strictly decreasing.
    pub fn validate(&self) -> Result<()> {
        let limits = [self.safe, self.borderline, self.rare];

        if limits.iter().any(|&l| !(l > 0. && l < 1.)) {
            return Err(Error::InvalidParameter(
                format!("kernel thresholds must be in (0, 1), got {}/{}/{}",
                        self.safe, self.borderline, self.rare)));
        }
        if !(self.safe > self.borderline && self.borderline > self.rare) {
            return Err(Error::InvalidParameter(
                format!("kernel thresholds must be strictly decreasing, got {}/{}/{}",
                        self.safe, self.borderline, self.rare)));
        }
        if self.bandwidth_neighbour == 0 {
            return Err(Error::InvalidParameter("bandwidth neighbour must be positive"
                                                   .to_string()));
        }
        Ok(())
    }

    /// Type of an example with minority density ratio `ratio`.
    pub fn label(&self, ratio: f64) -> LearningExampleType {
        if ratio > self.safe {
            LearningExampleType::Safe
        } else if ratio > self.borderline {
            LearningExampleType::Borderline
        } else if ratio > self.rare {
            LearningExampleType::Rare
        } else {
            LearningExampleType::Outlier
        }
    }
}

/// Epanechnikov kernel, vanishing outside [-1, 1].
pub fn epanechnikov(distance: f64) -> f64 {
    if distance.abs() > 1. {
        0.
    } else {
        0.75 * (1. - distance * distance)
    }
}

/// Analyzer labelling minority examples by the share of minority density
/// in a window around them.
///
/// The window of an example contains every neighbour within the kernel
/// width; neighbours are weighted with the Epanechnikov kernel of their
/// distance. Only neighbours whose decision equals one of the two limiting
/// decisions contribute.
pub struct Kernel<'a> {
    neighbourhood: Neighbourhood<'a>,
    params: KernelParams,
    minority_decision: Decision,
    majority_decision: Decision,
    width: f64,
}

impl<'a> Kernel<'a> {
    /// Constructs a kernel analyzer, estimating the kernel width.
    ///
    /// # Arguments
    ///
    /// * `neighbourhood` - Majority and minority objects.
    /// * `params` - Ratio thresholds and bandwidth neighbour.
    /// * `minority_decision` - Limiting decision of the minority set.
    /// * `majority_decision` - Limiting decision of the majority set.
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
    /// let inputs = array![[0.], [1.], [2.], [3.], [20.], [21.], [22.], [23.]];
    /// let targets = array![1, 1, 1, 1, 0, 0, 0, 0];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .unwrap();
    /// let distances = DistanceArray::new(&Hvdm::new(&table));
    /// let neighbourhood = Neighbourhood::new(&table, &distances, &[4, 5, 6, 7], &[0, 1, 2, 3])
    ///                                   .unwrap();
    /// let params = KernelParams { bandwidth_neighbour: 2, ..Default::default() };
    ///
    /// let kernel = Kernel::new(neighbourhood, params,
    ///                          table.decision(0).clone(), table.decision(4).clone())
    ///                     .unwrap();
    /// assert!(kernel.width() > 0.);
    /// assert_eq!(kernel.ratio(0), Some(1.));
    /// assert_eq!(kernel.label_example(0), LearningExampleType::Safe);
    /// # }
    /// ```
    pub fn new(neighbourhood: Neighbourhood<'a>, params: KernelParams,
               minority_decision: Decision, majority_decision: Decision)
            -> Result<Kernel<'a>> {
        params.validate()?;

        let width = estimate_width(&neighbourhood, params.bandwidth_neighbour);
        debug!("kernel width {} ({} vs {})", width, minority_decision, majority_decision);

        Ok(Kernel { neighbourhood, params, minority_decision, majority_decision, width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Share of the minority decision in the weighted density around
    /// `example`, or `None` if the window carries no weight.
    pub fn ratio(&self, example: usize) -> Option<f64> {
        let (minority, majority) = self.neighbourhood
                                       .ranked_neighbours(example)
                                       .into_iter()
                                       .take_while(|n| n.distance <= self.width)
                                       .fold((0., 0.), |(min, maj), n| {
            let decision = self.neighbourhood.decision(n.index);
            let w = epanechnikov(n.distance);

            if *decision == self.minority_decision {
                (min + w, maj)
            } else if *decision == self.majority_decision {
                (min, maj + w)
            } else {
                (min, maj)
            }
        });

        let total = minority + majority;
        if total > 0. && total.is_finite() {
            Some(minority / total)
        } else {
            None
        }
    }
}

/// Mean distance from the minority examples to their `n`-th nearest
/// neighbour.
///
/// Examples with fewer neighbours use their farthest one; examples with
/// no neighbour at all are left out.
fn estimate_width(neighbourhood: &Neighbourhood, n: usize) -> f64 {
    let distances = neighbourhood.minority()
                                 .iter()
                                 .filter_map(|&e| {
                                     let ranked = neighbourhood.ranked_neighbours(e);
                                     ranked.get(n - 1)
                                           .or_else(|| ranked.last())
                                           .map(|neighbour| neighbour.distance)
                                 })
                                 .collect::<Vec<_>>();

    if distances.is_empty() {
        0.
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

impl<'a> ExampleLabeler for Kernel<'a> {
    fn neighbourhood(&self) -> &Neighbourhood<'_> {
        &self.neighbourhood
    }

    fn label_example(&self, example: usize) -> LearningExampleType {
        match self.ratio(example) {
            Some(ratio) => self.params.label(ratio),
            None => LearningExampleType::Outlier,
        }
    }
}
