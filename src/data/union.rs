//! Unions of ordered decision classes.
//!
//! An upward union ("at least X") contains the objects whose decision is
//! at least as good as the limiting decision X; a downward union ("at
//! most X") those whose decision is at most as good as X. Objects whose
//! decision cannot be compared with X are kept apart as neutral objects.
use std::fmt;

use crate::data::{Decision, InformationTable, TernaryLogic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionType {
    AtLeast,
    AtMost,
}

/// A union of decision classes with a single limiting decision.
#[derive(Debug, Clone)]
pub struct Union {
    union_type: UnionType,
    limiting_decision: Decision,
    // Both sorted ascending.
    objects: Vec<usize>,
    neutral_objects: Vec<usize>,
}

impl Union {
    /// Collects the objects of `table` belonging to the union.
    ///
    /// # Arguments
    ///
    /// * `union_type` - Direction of the union.
    /// * `limiting_decision` - Threshold decision of the union.
    /// * `table` - Information table the objects are taken from.
    ///
    /// # Examples
    ///
    /// ```
    /// #[macro_use(array)]
    /// extern crate ndarray;
    /// extern crate ordinal_neighbours;
    ///
    /// # fn main() {
    /// use ordinal_neighbours::data::{InformationTable, Union, UnionType};
    ///
    /// let inputs = array![[0.], [1.], [2.], [3.]];
    /// let targets = array![0, 1, 2, 1];
    /// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
    ///                              .unwrap();
    ///
    /// let at_least_1 = Union::new(UnionType::AtLeast, table.classes()[1].clone(), &table);
    /// assert_eq!(at_least_1.objects(), &[1, 2, 3]);
    /// # }
    /// ```
    pub fn new(union_type: UnionType, limiting_decision: Decision,
               table: &InformationTable) -> Union {
        let mut objects = vec![];
        let mut neutral_objects = vec![];

        for (i, decision) in table.decisions().iter().enumerate() {
            let concordant = match union_type {
                UnionType::AtLeast => decision.is_at_least_as_good_as(&limiting_decision),
                UnionType::AtMost => decision.is_at_most_as_good_as(&limiting_decision),
            };
            match concordant {
                TernaryLogic::True => objects.push(i),
                TernaryLogic::Uncomparable => neutral_objects.push(i),
                TernaryLogic::False => {},
            }
        }

        Union {
            union_type,
            limiting_decision,
            objects,
            neutral_objects,
        }
    }

    pub fn union_type(&self) -> UnionType {
        self.union_type
    }

    pub fn limiting_decision(&self) -> &Decision {
        &self.limiting_decision
    }

    /// Indices of the objects belonging to the union, ascending.
    pub fn objects(&self) -> &[usize] {
        &self.objects
    }

    /// Indices of the objects whose decision is uncomparable with the
    /// limiting decision, ascending.
    pub fn neutral_objects(&self) -> &[usize] {
        &self.neutral_objects
    }

    pub fn contains(&self, object: usize) -> bool {
        self.objects.binary_search(&object).is_ok()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.union_type {
            UnionType::AtLeast => write!(f, ">={}", self.limiting_decision),
            UnionType::AtMost => write!(f, "<={}", self.limiting_decision),
        }
    }
}
