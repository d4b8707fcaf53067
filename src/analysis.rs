//! Neighbourhood analysis of a whole information table.
//!
//! `NeighbourhoodAnalysis` compares every adjacent pair of upward and
//! downward unions, and every decision class against the unions next to
//! it, running a k-NN and a kernel analyzer on each comparison. The types
//! assigned to minority examples are collected in one `AnalysisResult`
//! per comparison family.
use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use serde_derive::Serialize;

use crate::analyzer::*;
use crate::data::{ClassPartition, Decision, InformationTable};
use crate::error::Result;
use crate::measure::{DistanceArray, Hvdm};

/// What is compared against what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Comparison {
    UnionVsUnion,
    ClassVsUnion,
}

/// How minority examples are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strategy {
    Knn,
    Kernel,
}

/// A comparison paired with a labelling strategy; each family has its own
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Family {
    pub comparison: Comparison,
    pub strategy: Strategy,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family { comparison: Comparison::UnionVsUnion, strategy: Strategy::Knn },
        Family { comparison: Comparison::UnionVsUnion, strategy: Strategy::Kernel },
        Family { comparison: Comparison::ClassVsUnion, strategy: Strategy::Knn },
        Family { comparison: Comparison::ClassVsUnion, strategy: Strategy::Kernel },
    ];

    /// Name used for result files, e.g. `union_vs_union_knn`.
    pub fn name(&self) -> &'static str {
        match (self.comparison, self.strategy) {
            (Comparison::UnionVsUnion, Strategy::Knn) => "union_vs_union_knn",
            (Comparison::UnionVsUnion, Strategy::Kernel) => "union_vs_union_kernel",
            (Comparison::ClassVsUnion, Strategy::Knn) => "class_vs_union_knn",
            (Comparison::ClassVsUnion, Strategy::Kernel) => "class_vs_union_kernel",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type assigned to one minority example in one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    #[serde(rename = "type")]
    pub example_type: LearningExampleType,
    pub minority_decision: String,
    pub majority_decision: String,
}

/// Rows produced by all comparisons of one family, in the order the
/// comparisons were run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    family: Family,
    rows: Vec<ResultRow>,
}

impl AnalysisResult {
    pub fn new(family: Family) -> AnalysisResult {
        AnalysisResult { family, rows: vec![] }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Appends one row per assigned example, by increasing index.
    pub fn add_results(&mut self, assignment: &Assignment, minority_decision: &Decision,
                       majority_decision: &Decision) {
        self.rows.extend(assignment.iter()
                                   .map(|(&index, &example_type)| ResultRow {
                                       index,
                                       example_type,
                                       minority_decision: minority_decision.to_string(),
                                       majority_decision: majority_decision.to_string(),
                                   }));
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn distribution(&self) -> TypeDistribution {
        TypeDistribution::new(self.rows.iter().map(|r| r.example_type))
    }
}

/// Number of rows of each type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeDistribution {
    counts: [usize; 4],
}

impl TypeDistribution {
    pub fn new<I>(types: I) -> TypeDistribution
        where I: IntoIterator<Item=LearningExampleType>
    {
        let mut counts = [0; 4];
        for t in types {
            counts[Self::slot(t)] += 1;
        }
        TypeDistribution { counts }
    }

    fn slot(t: LearningExampleType) -> usize {
        LearningExampleType::ALL.iter()
                                .position(|&u| u == t)
                                .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn count(&self, t: LearningExampleType) -> usize {
        self.counts[Self::slot(t)]
    }

    /// Share of `t` among all rows, in percent (0 for an empty result).
    pub fn percentage(&self, t: LearningExampleType) -> f64 {
        match self.total() {
            0 => 0.,
            total => self.count(t) as f64 / total as f64 * 100.,
        }
    }

    /// A summary row named `name`.
    pub fn summary(&self, name: &str) -> SummaryRow {
        SummaryRow {
            name: name.to_string(),
            safe: self.percentage(LearningExampleType::Safe),
            borderline: self.percentage(LearningExampleType::Borderline),
            rare: self.percentage(LearningExampleType::Rare),
            outlier: self.percentage(LearningExampleType::Outlier),
        }
    }
}

/// Percentage of each type in the result of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub safe: f64,
    pub borderline: f64,
    pub rare: f64,
    pub outlier: f64,
}

/// Which k-NN analyzer the analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnnRule {
    /// Same-class neighbour count (`KNN`).
    #[default]
    SameClassCount,
    /// Count refined by checking mutual nearest neighbours (`MutualKNN`).
    MutualNeighbour,
}

/// Parameters of a `NeighbourhoodAnalysis`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisConfig {
    pub knn: KnnParams,
    pub kernel: KernelParams,
    pub knn_rule: KnnRule,
}

impl AnalysisConfig {
    pub fn validate(&self, n_objects: usize) -> Result<()> {
        self.knn.validate(n_objects)?;
        self.kernel.validate()
    }
}

/// Results of an analysis, one per family.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResults {
    results: BTreeMap<Family, AnalysisResult>,
}

impl AnalysisResults {
    fn new() -> AnalysisResults {
        AnalysisResults {
            results: Family::ALL.iter()
                                .map(|&f| (f, AnalysisResult::new(f)))
                                .collect(),
        }
    }

    fn get_mut(&mut self, family: Family) -> &mut AnalysisResult {
        self.results.entry(family).or_insert_with(|| AnalysisResult::new(family))
    }

    pub fn get(&self, family: Family) -> Option<&AnalysisResult> {
        self.results.get(&family)
    }

    pub fn iter(&self) -> impl Iterator<Item=&AnalysisResult> {
        self.results.values()
    }
}

/// Neighbourhood analysis of an information table.
///
/// The HVDM and all pairwise distances are computed once, on
/// construction, and shared by every comparison.
///
/// # Examples
///
/// ```
/// #[macro_use(array)]
/// extern crate ndarray;
/// extern crate ordinal_neighbours;
///
/// # fn main() {
/// use ordinal_neighbours::analysis::*;
/// use ordinal_neighbours::analyzer::LearningExampleType;
/// use ordinal_neighbours::data::InformationTable;
///
/// let inputs = array![[0.], [1.], [2.], [3.], [4.], [5.],
///                     [10.], [11.], [12.], [13.], [14.], [15.]];
/// let targets = array![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
/// let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
///                              .unwrap();
///
/// let analysis = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default())
///                                      .expect("Invalid configuration");
/// let results = analysis.run().expect("Analysis failed");
///
/// let family = Family { comparison: Comparison::UnionVsUnion, strategy: Strategy::Knn };
/// let result = results.get(family).unwrap();
/// assert_eq!(result.len(), 6);
/// assert_eq!(result.distribution().percentage(LearningExampleType::Safe), 100.);
/// # }
/// ```
pub struct NeighbourhoodAnalysis<'a> {
    table: &'a InformationTable,
    config: AnalysisConfig,
    distances: DistanceArray,
    partition: ClassPartition,
}

impl<'a> NeighbourhoodAnalysis<'a> {
    /// Validates `config` against `table`, then precomputes distances.
    pub fn new(table: &'a InformationTable, config: AnalysisConfig)
            -> Result<NeighbourhoodAnalysis<'a>> {
        config.validate(table.n_objects())?;

        let hvdm = Hvdm::new(table);
        let distances = DistanceArray::new(&hvdm);
        let partition = ClassPartition::new(table);
        info!("distances between {} objects computed; {} decision classes",
              table.n_objects(), partition.n_classes());

        Ok(NeighbourhoodAnalysis { table, config, distances, partition })
    }

    pub fn distances(&self) -> &DistanceArray {
        &self.distances
    }

    pub fn partition(&self) -> &ClassPartition {
        &self.partition
    }

    /// Runs the union-vs-union and the class-vs-union comparisons.
    pub fn run(&self) -> Result<AnalysisResults> {
        let mut results = AnalysisResults::new();

        info!("union vs union analysis");
        self.union_vs_union(&mut results)?;
        info!("class vs union analysis");
        self.class_vs_union(&mut results)?;

        for result in results.iter() {
            debug!("{}: {} rows", result.family(), result.len());
        }
        Ok(results)
    }

    /// Adjacent unions, from the most preferred pair down; the larger
    /// union is the majority (the "at most" one on ties).
    fn union_vs_union(&self, results: &mut AnalysisResults) -> Result<()> {
        let pairs = self.partition.upward_unions()
                                  .iter()
                                  .zip(self.partition.downward_unions())
                                  .rev();

        for (upward, downward) in pairs {
            let (majority, minority) = if upward.len() > downward.len() {
                (upward, downward)
            } else {
                (downward, upward)
            };

            self.compare(Comparison::UnionVsUnion, majority.objects(), minority.objects(),
                         majority.limiting_decision(), minority.limiting_decision(),
                         results)?;
        }
        Ok(())
    }

    /// Each class against the "at least" union just above it and, with
    /// more than two classes, the class just above against the "at most"
    /// union below it.
    fn class_vs_union(&self, results: &mut AnalysisResults) -> Result<()> {
        let classes = self.table.classes();
        let n_classes = classes.len();

        for (j, (upward, downward)) in self.partition.upward_unions()
                                                     .iter()
                                                     .zip(self.partition.downward_unions())
                                                     .enumerate() {
            let (below, above) = (j, j + 1);

            self.compare(Comparison::ClassVsUnion, upward.objects(),
                         self.partition.class_objects(below), upward.limiting_decision(),
                         &classes[below], results)?;

            if n_classes > 2 {
                self.compare(Comparison::ClassVsUnion, downward.objects(),
                             self.partition.class_objects(above),
                             downward.limiting_decision(), &classes[above], results)?;
            }
        }
        Ok(())
    }

    /// Labels `minority` against `majority` with both strategies.
    fn compare(&self, comparison: Comparison, majority: &[usize], minority: &[usize],
               majority_decision: &Decision, minority_decision: &Decision,
               results: &mut AnalysisResults) -> Result<()> {
        if majority.is_empty() || minority.is_empty() {
            warn!("skipping {} ({} objects) vs {} ({} objects): empty side",
                  minority_decision, minority.len(), majority_decision, majority.len());
            return Ok(());
        }
        debug!("{} ({} objects) vs {} ({} objects)", minority_decision, minority.len(),
               majority_decision, majority.len());

        let neighbourhood = Neighbourhood::new(self.table, &self.distances, majority,
                                               minority)?;

        let knn_labels = match self.config.knn_rule {
            KnnRule::SameClassCount => KNN::new(neighbourhood.clone(), self.config.knn)?
                                          .label_all(),
            KnnRule::MutualNeighbour => MutualKNN::new(neighbourhood.clone(), self.config.knn)?
                                                .label_all(),
        };
        results.get_mut(Family { comparison, strategy: Strategy::Knn })
               .add_results(&knn_labels, minority_decision, majority_decision);

        let kernel = Kernel::new(neighbourhood, self.config.kernel,
                                 minority_decision.clone(), majority_decision.clone())?;
        results.get_mut(Family { comparison, strategy: Strategy::Kernel })
               .add_results(&kernel.label_all(), minority_decision, majority_decision);

        Ok(())
    }
}
