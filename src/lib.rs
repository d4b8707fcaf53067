//! The ordinal-neighbours crate.
//!
//! A crate assigning a type to the learning examples of ordinal
//! classification data, depending on how "safe" their neighbourhood is:
//! `SAFE`, `BORDERLINE`, `RARE` or `OUTLIER`. Rather than a single
//! minority/majority split, examples are compared against pairs of unions
//! of ordered classes ("at least `d`" vs "at most `d - 1`") and against the
//! unions adjacent to their own class.
//!
//! # Goals
//! * Heterogeneous distances (HVDM) over numeric, nominal and missing
//!   values, computed once per dataset.
//! * k-NN and kernel density analyzers, usable on their own or through a
//!   whole-table `NeighbourhoodAnalysis`.
//! * Can be called as a binary on single datasets or whole directories.
//!
//! # Examples
//!
//! Analyze a small table with two decision classes, using the default
//! parameters (k-NN with `k=5`, kernel thresholds `0.7/0.3/0.1`).
//!
//! The results hold one `AnalysisResult` per comparison family; each row
//! tells the type of one minority example.
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate ordinal_neighbours;
//!
//! # fn main() {
//! use ordinal_neighbours::analysis::*;
//! use ordinal_neighbours::data::InformationTable;
//!
//! let inputs = array![[0., 0.],
//!                     [1., 0.],
//!                     [0., 1.],
//!                     [1., 1.],
//!                     [2., 2.],
//!                     [5., 5.],
//!                     [6., 5.],
//!                     [5., 6.],
//!                     [6., 6.]];
//! let targets = array![0, 0, 0, 0, 0, 1, 1, 1, 1];
//! let table = InformationTable::from_inputs(&inputs.view(), &targets.view())
//!                              .expect("Invalid table");
//!
//! let analysis = NeighbourhoodAnalysis::new(&table, AnalysisConfig::default())
//!                                      .expect("Invalid configuration");
//! let results = analysis.run()
//!                       .expect("Failed analysis");
//!
//! let family = Family { comparison: Comparison::UnionVsUnion, strategy: Strategy::Knn };
//! let rows = results.get(family).unwrap().rows();
//! // The smaller union (at least 1) is the minority.
//! assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![5, 6, 7, 8]);
//! # }
//! ```
//!
//! Single analyzers are found in [analyzer](analyzer/index.html).
pub mod analysis;
pub mod analyzer;
pub mod data;
pub mod error;
pub mod measure;
pub mod utils;

pub use crate::error::{Error, Result};
