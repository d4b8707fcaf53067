//! Heterogeneous Value Difference Metric.
use ndarray::prelude::*;

use crate::data::{Field, InformationTable};
use crate::measure::{AttributeStats, Measure};

/// The HVDM over the condition attributes of an information table.
///
/// The distance between two objects is the sum, over all condition
/// attributes, of:
///  - 1, if either value is missing;
///  - the normalized VDM of the two values, for nominal attributes;
///  - `|x - y| / (4 * std_dev)`, for numeric attributes (0 when the
///    attribute has no spread).
pub struct Hvdm {
    values: Array2<f64>,
    missing: Array2<bool>,
    stats: Vec<AttributeStats>,
}

impl Hvdm {
    /// Computes attribute statistics of `table` and prepares the measure.
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
    /// use ordinal_neighbours::measure::{Hvdm, Measure};
    ///
    /// let inputs = array![[0.], [1.], [2.], [3.], [4.]];
    /// let targets = array![0, 0, 1, 1, 1];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .unwrap();
    /// let hvdm = Hvdm::new(&table);
    ///
    /// assert_eq!(hvdm.distance(1, 3), hvdm.distance(3, 1));
    /// # }
    /// ```
    pub fn new(table: &InformationTable) -> Hvdm {
        let fields = table.fields();

        // Nominal codes are stored as f64 next to numeric values.
        let values = fields.mapv(|f| match f {
            Field::Numeric(v) => v,
            Field::Nominal(code) => code as f64,
            Field::Missing => 0.,
        });
        let missing = fields.mapv(|f| f.is_missing());
        let stats = (0..table.n_attributes())
                        .map(|a| AttributeStats::compute(table, a))
                        .collect();

        Hvdm { values, missing, stats }
    }

    pub fn stats(&self) -> &[AttributeStats] {
        &self.stats
    }

    /// Contribution of the `attribute`-th attribute to the distance
    /// between `x` and `y`.
    fn attribute_distance(&self, attribute: usize, x: usize, y: usize) -> f64 {
        if self.missing[[x, attribute]] || self.missing[[y, attribute]] {
            return 1.;
        }
        let vx = self.values[[x, attribute]];
        let vy = self.values[[y, attribute]];

        match self.stats[attribute] {
            AttributeStats::Nominal(ref stats) => stats.vdm(vx as usize, vy as usize),
            AttributeStats::Numeric(ref stats) => {
                if stats.std_dev > 0. {
                    (vx - vy).abs() / (4. * stats.std_dev)
                } else {
                    0.
                }
            }
        }
    }
}

impl Measure for Hvdm {
    fn n_objects(&self) -> usize {
        self.values.nrows()
    }

    fn distance(&self, x: usize, y: usize) -> f64 {
        (0..self.stats.len())
            .map(|a| self.attribute_distance(a, x, y))
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::data::{Attribute, Decision};
    use ndarray::array;

    #[test]
    fn numeric_distance_is_scaled_by_std_dev() {
        let inputs = Array::from_shape_fn((10, 1), |(i, _)| i as f64);
        let targets = Array::from_shape_fn(10, |i| if i < 5 { 0 } else { 1 });
        let table = InformationTable::from_inputs(&inputs.view(), &targets.view()).unwrap();
        let hvdm = Hvdm::new(&table);

        // Population standard deviation of 0, 1, ..., 9.
        let std_dev = 8.25f64.sqrt();
        for i in 0..10 {
            for j in 0..10 {
                let expected = (i as f64 - j as f64).abs() / (4. * std_dev);
                assert_abs_diff_eq!(hvdm.distance(i, j), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn mixed_attributes() {
        let attributes = vec![Attribute::numeric("x"),
                              Attribute::nominal("colour", &["red", "green"])];
        let fields = array![[Field::Numeric(0.), Field::Nominal(0)],
                            [Field::Numeric(2.), Field::Nominal(0)],
                            [Field::Missing, Field::Nominal(1)],
                            [Field::Numeric(4.), Field::Missing]];
        let decisions = vec![Decision::new("0", 0.), Decision::new("0", 0.),
                             Decision::new("1", 1.), Decision::new("1", 1.)];
        let table = InformationTable::new(attributes, Attribute::numeric("y"), fields,
                                          decisions).unwrap();
        let hvdm = Hvdm::new(&table);

        // Numeric std dev over present values {0, 2, 4}.
        let std_dev = (8f64 / 3.).sqrt();
        // Same colour: only the numeric part counts.
        assert_abs_diff_eq!(hvdm.distance(0, 1), 2. / (4. * std_dev), epsilon = 1e-12);
        // Missing numeric value: 1, plus VDM(red, green) = sqrt(1 + 1).
        assert_abs_diff_eq!(hvdm.distance(0, 2), 1. + 2f64.sqrt(), epsilon = 1e-12);
        // Missing on both attributes.
        assert_abs_diff_eq!(hvdm.distance(2, 3), 2., epsilon = 1e-12);
        assert_eq!(hvdm.distance(3, 3), 1.);
    }

    #[test]
    fn constant_attribute_contributes_nothing() {
        let inputs = array![[5., 0.], [5., 1.], [5., 2.]];
        let targets = array![0, 1, 1];
        let table = InformationTable::from_inputs(&inputs.view(), &targets.view()).unwrap();
        let hvdm = Hvdm::new(&table);

        let std_dev = (2f64 / 3.).sqrt();
        assert_abs_diff_eq!(hvdm.distance(0, 2), 2. / (4. * std_dev), epsilon = 1e-12);
    }
}
