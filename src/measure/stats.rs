//! Per-attribute statistics needed by the HVDM.
use ndarray::prelude::*;
use statrs::statistics::Statistics;

use crate::data::{AttributeKind, Field, InformationTable};

/// Mean, population variance and standard deviation of a numeric
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl NumericStats {
    /// Computes the statistics of a series of values.
    ///
    /// An empty series has all statistics equal to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordinal_neighbours::measure::NumericStats;
    ///
    /// let stats = NumericStats::new(&[0., 1., 2., 3., 4.]);
    /// assert!((stats.mean - 2.).abs() < 1e-12);
    /// assert!((stats.variance - 2.).abs() < 1e-12);
    /// ```
    pub fn new(values: &[f64]) -> NumericStats {
        if values.is_empty() {
            return NumericStats { mean: 0., variance: 0., std_dev: 0. };
        }
        let mean = values.iter().mean();
        let variance = values.iter().population_variance();

        NumericStats {
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Value counts of a nominal attribute, overall and per decision class.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalStats {
    // counts[v]: objects having value v.
    counts: Array1<usize>,
    // class_counts[[v, c]]: objects having value v and decision class c.
    class_counts: Array2<usize>,
}

impl NominalStats {
    /// Counts values.
    ///
    /// # Arguments
    ///
    /// * `observations` - Pairs `(value code, class index)`, one per object
    ///                    whose value is present.
    /// * `cardinality` - Number of admissible values.
    /// * `n_classes` - Number of decision classes.
    pub fn new<I>(observations: I, cardinality: usize, n_classes: usize) -> NominalStats
            where I: IntoIterator<Item = (usize, usize)> {
        let mut counts = Array1::<usize>::zeros(cardinality);
        let mut class_counts = Array2::<usize>::zeros((cardinality, n_classes));

        for (value, class) in observations {
            counts[value] += 1;
            class_counts[[value, class]] += 1;
        }

        NominalStats { counts, class_counts }
    }

    pub fn count(&self, value: usize) -> usize {
        self.counts[value]
    }

    pub fn count_for_class(&self, value: usize, class: usize) -> usize {
        self.class_counts[[value, class]]
    }

    /// Share of the objects having `value` that belong to `class`;
    /// zero for a value nobody has.
    pub fn class_probability(&self, value: usize, class: usize) -> f64 {
        match self.count(value) {
            0 => 0.,
            n => self.count_for_class(value, class) as f64 / n as f64,
        }
    }

    /// Normalized Value Difference Metric between two values.
    pub fn vdm(&self, x: usize, y: usize) -> f64 {
        (0..self.class_counts.ncols())
            .map(|c| (self.class_probability(x, c) - self.class_probability(y, c)).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeStats {
    Numeric(NumericStats),
    Nominal(NominalStats),
}

impl AttributeStats {
    /// Computes the statistics of the `attribute`-th condition attribute
    /// over all objects of `table` having a value for it.
    pub fn compute(table: &InformationTable, attribute: usize) -> AttributeStats {
        let fields = table.fields();
        let column = fields.column(attribute);

        match table.attributes()[attribute].kind {
            AttributeKind::Numeric => {
                let values = column.iter()
                                   .filter_map(|f| match *f {
                                       Field::Numeric(v) => Some(v),
                                       _ => None,
                                   })
                                   .collect::<Vec<_>>();
                AttributeStats::Numeric(NumericStats::new(&values))
            }
            AttributeKind::Nominal { ref values } => {
                let observations = column.iter()
                                         .enumerate()
                                         .filter_map(|(i, f)| match *f {
                                             Field::Nominal(v) => Some((v, table.class_index(i))),
                                             _ => None,
                                         });
                AttributeStats::Nominal(NominalStats::new(observations, values.len(),
                                                          table.classes().len()))
            }
        }
    }
}
