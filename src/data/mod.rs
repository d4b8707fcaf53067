//! Information tables with an ordinal decision attribute.
//!
//! An `InformationTable` stores, for each object, the values of its
//! condition attributes (numeric, nominal or missing) and its `Decision`.
//! Decisions are ordinal: they can be compared with
//! `is_at_least_as_good_as()` / `is_at_most_as_good_as()`, which may
//! answer `Uncomparable` for decisions evaluated on several criteria.
pub mod partition;
pub mod union;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use ndarray::prelude::*;
use ordered_float::OrderedFloat;

use crate::error::{Error, Result};

pub use self::partition::ClassPartition;
pub use self::union::{Union, UnionType};

/// Value domain of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Real-valued attribute.
    Numeric,
    /// Finite enumeration; a `Field::Nominal(code)` refers to
    /// `values[code]`.
    Nominal { values: Vec<String> },
}

/// Preference direction of an attribute.
///
/// Only the decision attribute uses it, to order decision classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Higher values (or later nominal values) are better.
    Gain,
    /// Lower values (or earlier nominal values) are better.
    Cost,
    /// No preference; treated like `Gain` when ordering decisions.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub preference: Preference,
}

impl Attribute {
    pub fn numeric(name: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Numeric,
            preference: Preference::None,
        }
    }

    pub fn nominal(name: &str, values: &[&str]) -> Attribute {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Nominal {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
            preference: Preference::None,
        }
    }

    pub fn with_preference(mut self, preference: Preference) -> Attribute {
        self.preference = preference;
        self
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal { .. })
    }

    /// Number of admissible values of a nominal attribute, `None` for
    /// numeric ones.
    pub fn cardinality(&self) -> Option<usize> {
        match self.kind {
            AttributeKind::Nominal { ref values } => Some(values.len()),
            AttributeKind::Numeric => None,
        }
    }
}

/// A single cell of an information table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Numeric(f64),
    /// Index into the attribute's value list.
    Nominal(usize),
    Missing,
}

impl Field {
    pub fn is_missing(&self) -> bool {
        matches!(*self, Field::Missing)
    }
}

/// Three-valued answer of an ordinal comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TernaryLogic {
    True,
    False,
    Uncomparable,
}

/// An ordinal class label.
///
/// `evaluations` hold one value per decision criterion, oriented so that
/// a higher value is always better. Two decisions are equal iff their
/// labels are.
#[derive(Debug, Clone)]
pub struct Decision {
    label: String,
    evaluations: Vec<OrderedFloat<f64>>,
}

impl Decision {
    /// Constructs a decision evaluated on a single criterion.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordinal_neighbours::data::{Decision, TernaryLogic};
    ///
    /// let good = Decision::new("good", 2.);
    /// let bad = Decision::new("bad", 1.);
    /// assert_eq!(good.is_at_least_as_good_as(&bad), TernaryLogic::True);
    /// assert_eq!(good.is_at_most_as_good_as(&bad), TernaryLogic::False);
    /// ```
    pub fn new(label: &str, evaluation: f64) -> Decision {
        Decision::composite(label, &[evaluation])
    }

    /// Constructs a decision evaluated on several criteria; such
    /// decisions are only partially ordered.
    pub fn composite(label: &str, evaluations: &[f64]) -> Decision {
        Decision {
            label: label.to_string(),
            evaluations: evaluations.iter().map(|&e| OrderedFloat(e)).collect(),
        }
    }

    /// Builds the decision of an object from its decision attribute value.
    ///
    /// Nominal decisions are ranked by their position in the attribute's
    /// value list, numeric ones by their value; `Preference::Cost`
    /// reverses the ranking.
    pub fn from_field(attribute: &Attribute, field: &Field, label: &str) -> Result<Decision> {
        let evaluation = match (&attribute.kind, *field) {
            (&AttributeKind::Nominal { ref values }, Field::Nominal(code)) if code < values.len() => {
                code as f64
            }
            (&AttributeKind::Numeric, Field::Numeric(v)) if v.is_finite() => v,
            (_, Field::Missing) => {
                return Err(Error::Format(format!("missing value of decision attribute {}",
                                                 attribute.name)));
            }
            _ => {
                return Err(Error::Format(format!("invalid value {:?} of decision attribute {}",
                                                 field, attribute.name)));
            }
        };

        let evaluation = match attribute.preference {
            Preference::Cost => -evaluation,
            Preference::Gain | Preference::None => evaluation,
        };

        Ok(Decision::new(label, evaluation))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tells whether this decision is at least as good as `other` on
    /// every criterion.
    pub fn is_at_least_as_good_as(&self, other: &Decision) -> TernaryLogic {
        self.dominance(other, |a, b| a >= b, |a, b| a < b)
    }

    /// Tells whether this decision is at most as good as `other` on
    /// every criterion.
    pub fn is_at_most_as_good_as(&self, other: &Decision) -> TernaryLogic {
        self.dominance(other, |a, b| a <= b, |a, b| a > b)
    }

    fn dominance<F, G>(&self, other: &Decision, agrees: F, opposes: G) -> TernaryLogic
            where F: Fn(OrderedFloat<f64>, OrderedFloat<f64>) -> bool,
                  G: Fn(OrderedFloat<f64>, OrderedFloat<f64>) -> bool {
        if self.evaluations.len() != other.evaluations.len() {
            return TernaryLogic::Uncomparable;
        }
        let pairs = self.evaluations.iter().zip(other.evaluations.iter());

        if pairs.clone().all(|(&a, &b)| agrees(a, b)) {
            TernaryLogic::True
        } else if pairs.clone().all(|(&a, &b)| a == b || opposes(a, b)) {
            TernaryLogic::False
        } else {
            TernaryLogic::Uncomparable
        }
    }

    /// Total order used to lay decision classes out from worst to best:
    /// lexicographic on evaluations, then by label.
    ///
    /// For single-criterion decisions this is the preference order; for
    /// composite ones it is one of its linear extensions.
    pub fn rank_cmp(&self, other: &Decision) -> Ordering {
        self.evaluations.cmp(&other.evaluations)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialEq for Decision {
    fn eq(&self, other: &Decision) -> bool {
        self.label == other.label
    }
}

impl Eq for Decision {}

impl Hash for Decision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A table of objects described by condition attributes and one ordinal
/// decision.
///
/// The table is immutable once built: distance statistics and unions are
/// derived from it and never invalidated.
#[derive(Debug, Clone)]
pub struct InformationTable {
    attributes: Vec<Attribute>,
    decision_attribute: Attribute,
    fields: Array2<Field>,
    decisions: Vec<Decision>,
    // Distinct decisions, worst first.
    classes: Vec<Decision>,
    // class_indices[i] is the position of decisions[i] in classes.
    class_indices: Vec<usize>,
}

impl InformationTable {
    /// Constructs an information table.
    ///
    /// # Arguments
    ///
    /// * `attributes` - Condition attributes, one per column of `fields`.
    /// * `decision_attribute` - Attribute the decisions were read from.
    /// * `fields` - Matrix (Array2<Field>) with one row per object.
    /// * `decisions` - Decision of each object.
    pub fn new(attributes: Vec<Attribute>, decision_attribute: Attribute,
               fields: Array2<Field>, decisions: Vec<Decision>) -> Result<InformationTable> {

        if fields.nrows() != decisions.len() {
            return Err(Error::Format(format!("{} rows of values but {} decisions",
                                             fields.nrows(), decisions.len())));
        }
        if decisions.is_empty() {
            return Err(Error::Format("information table has no objects".to_string()));
        }
        if fields.ncols() != attributes.len() {
            return Err(Error::Format(format!("{} columns of values but {} condition attributes",
                                             fields.ncols(), attributes.len())));
        }

        for ((i, a), field) in fields.indexed_iter() {
            let attribute = &attributes[a];
            let valid = match (&attribute.kind, *field) {
                (_, Field::Missing) => true,
                (&AttributeKind::Numeric, Field::Numeric(v)) => v.is_finite(),
                (&AttributeKind::Nominal { ref values }, Field::Nominal(code)) => code < values.len(),
                _ => false,
            };
            if !valid {
                return Err(Error::Format(format!("object {}: invalid value {:?} for attribute {}",
                                                 i, field, attribute.name)));
            }
        }

        let classes = decisions.iter()
                               .unique()
                               .sorted_by(|a, b| a.rank_cmp(b))
                               .cloned()
                               .collect::<Vec<_>>();
        let positions = classes.iter()
                               .enumerate()
                               .map(|(c, d)| (d, c))
                               .collect::<HashMap<_, _>>();
        let class_indices = decisions.iter()
                                     .map(|d| positions[d])
                                     .collect();

        Ok(InformationTable {
            attributes,
            decision_attribute,
            fields,
            decisions,
            classes,
            class_indices,
        })
    }

    /// Constructs a table of numeric attributes from an input matrix and
    /// integer class labels, where a larger label is a better class.
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
    ///
    /// let inputs = array![[0., 0.],
    ///                     [1., 0.],
    ///                     [2., 2.]];
    /// let targets = array![0, 0, 1];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .expect("Failed to build table");
    /// assert_eq!(table.n_objects(), 3);
    /// assert_eq!(table.classes().len(), 2);
    /// # }
    /// ```
    pub fn from_inputs(inputs: &ArrayView2<f64>, targets: &ArrayView1<usize>)
            -> Result<InformationTable> {
        let attributes = (0..inputs.ncols())
                            .map(|j| Attribute::numeric(&format!("x{}", j)))
                            .collect();
        let decision_attribute = Attribute::numeric("y").with_preference(Preference::Gain);
        let fields = inputs.mapv(Field::Numeric);
        let decisions = targets.iter()
                               .map(|&y| Decision::new(&y.to_string(), y as f64))
                               .collect();

        InformationTable::new(attributes, decision_attribute, fields, decisions)
    }

    pub fn n_objects(&self) -> usize {
        self.decisions.len()
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn decision_attribute(&self) -> &Attribute {
        &self.decision_attribute
    }

    pub fn fields(&self) -> ArrayView2<'_, Field> {
        self.fields.view()
    }

    pub fn field(&self, object: usize, attribute: usize) -> Field {
        self.fields[[object, attribute]]
    }

    pub fn decision(&self, object: usize) -> &Decision {
        &self.decisions[object]
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Distinct decisions, from the worst to the best.
    pub fn classes(&self) -> &[Decision] {
        &self.classes
    }

    /// Position of the object's decision in `classes()`.
    pub fn class_index(&self, object: usize) -> usize {
        self.class_indices[object]
    }

    /// Number of objects per decision class, aligned with `classes()`.
    pub fn decision_distribution(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for &c in &self.class_indices {
            counts[c] += 1;
        }
        counts
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grades() -> Attribute {
        Attribute::nominal("grade", &["low", "mid", "high"]).with_preference(Preference::Gain)
    }

    #[test]
    fn decisions_from_fields() {
        let attribute = grades();
        let low = Decision::from_field(&attribute, &Field::Nominal(0), "low").unwrap();
        let high = Decision::from_field(&attribute, &Field::Nominal(2), "high").unwrap();

        assert_eq!(high.is_at_least_as_good_as(&low), TernaryLogic::True);
        assert_eq!(low.is_at_least_as_good_as(&high), TernaryLogic::False);
        assert_eq!(low.is_at_least_as_good_as(&low), TernaryLogic::True);
        assert!(Decision::from_field(&attribute, &Field::Missing, "?").is_err());
        assert!(Decision::from_field(&attribute, &Field::Nominal(3), "x").is_err());
    }

    #[test]
    fn cost_decisions_are_reversed() {
        let attribute = Attribute::numeric("risk").with_preference(Preference::Cost);
        let small = Decision::from_field(&attribute, &Field::Numeric(1.), "1").unwrap();
        let large = Decision::from_field(&attribute, &Field::Numeric(3.), "3").unwrap();

        assert_eq!(small.is_at_least_as_good_as(&large), TernaryLogic::True);
        assert_eq!(small.rank_cmp(&large), Ordering::Greater);
    }

    #[test]
    fn composite_decisions_can_be_uncomparable() {
        let a = Decision::composite("a", &[1., 2.]);
        let b = Decision::composite("b", &[2., 1.]);
        let c = Decision::composite("c", &[2., 2.]);

        assert_eq!(a.is_at_least_as_good_as(&b), TernaryLogic::Uncomparable);
        assert_eq!(a.is_at_most_as_good_as(&b), TernaryLogic::Uncomparable);
        assert_eq!(c.is_at_least_as_good_as(&a), TernaryLogic::True);
        assert_eq!(a.is_at_least_as_good_as(&c), TernaryLogic::False);
    }

    #[test]
    fn decisions_are_equal_by_label() {
        assert_eq!(Decision::new("1", 1.), Decision::new("1", 1.));
        assert_ne!(Decision::new("1", 1.), Decision::new("2", 1.));
    }

    #[test]
    fn classes_are_ordered_worst_first() {
        let inputs = array![[0.], [1.], [2.], [3.], [4.]];
        let targets = array![2, 0, 1, 2, 0];
        let table = InformationTable::from_inputs(&inputs.view(), &targets.view()).unwrap();

        let labels = table.classes()
                          .iter()
                          .map(|d| d.label())
                          .collect::<Vec<_>>();
        assert_eq!(labels, vec!["0", "1", "2"]);
        assert_eq!(table.class_index(0), 2);
        assert_eq!(table.class_index(1), 0);
        assert_eq!(table.decision_distribution(), vec![2, 1, 2]);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let attributes = vec![grades()];
        let decision_attribute = Attribute::numeric("y");

        // Nominal code out of range.
        let fields = array![[Field::Nominal(5)]];
        let decisions = vec![Decision::new("0", 0.)];
        assert!(InformationTable::new(attributes.clone(), decision_attribute.clone(),
                                      fields, decisions).is_err());

        // Numeric value in a nominal column.
        let fields = array![[Field::Numeric(1.)]];
        let decisions = vec![Decision::new("0", 0.)];
        assert!(InformationTable::new(attributes.clone(), decision_attribute.clone(),
                                      fields, decisions).is_err());

        // Row count mismatch.
        let fields = array![[Field::Missing], [Field::Nominal(1)]];
        let decisions = vec![Decision::new("0", 0.)];
        assert!(InformationTable::new(attributes, decision_attribute, fields,
                                      decisions).is_err());
    }
}
