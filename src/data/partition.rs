//! Splits an information table into decision classes and unions of
//! classes.
use crate::data::{InformationTable, Union, UnionType};

/// Decision classes of a table together with its upward and downward
/// unions.
///
/// With classes `d_0 < d_1 < ... < d_{m-1}`, entry `i` of
/// `upward_unions()` is "at least `d_{i+1}`" and entry `i` of
/// `downward_unions()` is "at most `d_i`", so that both entries form an
/// adjacent, complementary pair.
#[derive(Debug, Clone)]
pub struct ClassPartition {
    objects_by_class: Vec<Vec<usize>>,
    upward_unions: Vec<Union>,
    downward_unions: Vec<Union>,
}

impl ClassPartition {
    pub fn new(table: &InformationTable) -> ClassPartition {
        let classes = table.classes();

        let mut objects_by_class = vec![vec![]; classes.len()];
        for i in 0..table.n_objects() {
            objects_by_class[table.class_index(i)].push(i);
        }

        let upward_unions = classes.iter()
                                   .skip(1)
                                   .map(|d| Union::new(UnionType::AtLeast, d.clone(), table))
                                   .collect();
        let downward_unions = classes.iter()
                                     .take(classes.len() - 1)
                                     .map(|d| Union::new(UnionType::AtMost, d.clone(), table))
                                     .collect();

        ClassPartition {
            objects_by_class,
            upward_unions,
            downward_unions,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.objects_by_class.len()
    }

    /// Objects whose decision is exactly the `class`-th decision
    /// (see `InformationTable::classes()`).
    pub fn class_objects(&self, class: usize) -> &[usize] {
        &self.objects_by_class[class]
    }

    /// "At least" unions, for every class but the worst, worst first.
    pub fn upward_unions(&self) -> &[Union] {
        &self.upward_unions
    }

    /// "At most" unions, for every class but the best, worst first.
    pub fn downward_unions(&self) -> &[Union] {
        &self.downward_unions
    }
}
