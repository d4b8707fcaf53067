//! Utility routines for loading datasets and storing results into files.
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use ndarray::prelude::*;
use serde_derive::Deserialize;

use crate::analysis::{AnalysisResult, AnalysisResults, SummaryRow};
use crate::data::{Attribute, AttributeKind, Decision, Field, InformationTable, Preference};
use crate::error::{Error, Result};

/// Separator of result and summary files.
pub const RESULT_DELIMITER: u8 = b';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ValueType {
    Numeric,
    Nominal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum Role {
    #[default]
    Condition,
    Decision,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum MetaPreference {
    Gain,
    Cost,
    #[default]
    None,
}

/// One entry of a metadata file.
#[derive(Debug, Deserialize)]
struct AttributeMeta {
    name: String,
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    preference: MetaPreference,
    #[serde(default = "active_by_default")]
    active: bool,
}

fn active_by_default() -> bool {
    true
}

impl AttributeMeta {
    fn to_attribute(&self) -> Result<Attribute> {
        let kind = match self.value_type {
            ValueType::Numeric => AttributeKind::Numeric,
            ValueType::Nominal if self.values.is_empty() => {
                return Err(Error::Format(format!("nominal attribute {} has no values",
                                                 self.name)));
            }
            ValueType::Nominal => AttributeKind::Nominal { values: self.values.clone() },
        };
        let preference = match self.preference {
            MetaPreference::Gain => Preference::Gain,
            MetaPreference::Cost => Preference::Cost,
            MetaPreference::None => Preference::None,
        };

        Ok(Attribute { name: self.name.clone(), kind, preference })
    }
}

/// Parses one cell of the data file.
fn parse_field(attribute: &Attribute, cell: &str) -> Result<Field> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "?" {
        return Ok(Field::Missing);
    }

    match attribute.kind {
        AttributeKind::Numeric => cell.parse::<f64>()
                                      .map(Field::Numeric)
                                      .map_err(|_| Error::Format(
                                          format!("{:?} is not a number (attribute {})",
                                                  cell, attribute.name))),
        AttributeKind::Nominal { ref values } => values.iter()
                                                       .position(|v| v == cell)
                                                       .map(Field::Nominal)
                                                       .ok_or_else(|| Error::Format(
                                                           format!("unknown value {:?} of attribute {}",
                                                                   cell, attribute.name))),
    }
}

/// Label printed for a decision value.
fn decision_label(field: &Field, attribute: &Attribute) -> String {
    match (field, &attribute.kind) {
        (&Field::Nominal(code), &AttributeKind::Nominal { ref values }) => values[code].clone(),
        (&Field::Numeric(v), _) => v.to_string(),
        _ => String::new(),
    }
}

/// Loads an information table.
///
/// # Arguments
///
/// * `metadata` - JSON file describing the attributes, in column order.
///   Each entry has a `name`, a `type` (`numeric` or `nominal`), the
///   `values` of nominal attributes, and optionally a `role`
///   (`condition`, `decision` or `description`), a `preference`
///   (`gain`, `cost` or `none`) and an `active` flag. Exactly one active
///   attribute must be the decision.
/// * `data` - Header-less delimited file, one object per row; `?` or an
///   empty cell is a missing value.
/// * `delimiter` - Column separator of `data`.
pub fn load_table<P, Q>(metadata: P, data: Q, delimiter: u8) -> Result<InformationTable>
        where P: AsRef<Path>, Q: AsRef<Path> {
    let meta: Vec<AttributeMeta> = serde_json::from_reader(File::open(metadata)?)?;

    let mut conditions = vec![];
    let mut decision = None;
    for (column, m) in meta.iter().enumerate() {
        if !m.active || m.role == Role::Description {
            continue;
        }
        let attribute = m.to_attribute()?;
        match m.role {
            Role::Decision if decision.is_some() => {
                return Err(Error::Format(format!("more than one decision attribute ({})",
                                                 m.name)));
            }
            Role::Decision => decision = Some((column, attribute)),
            _ => conditions.push((column, attribute)),
        }
    }
    let (decision_column, decision_attribute) = decision.ok_or_else(|| {
        Error::Format("no active decision attribute".to_string())
    })?;

    let mut reader = ReaderBuilder::new().has_headers(false)
                                         .delimiter(delimiter)
                                         .from_path(data)?;

    let mut fields = vec![];
    let mut decisions = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != meta.len() {
            return Err(Error::Format(format!("row {}: {} columns but {} attributes",
                                             row, record.len(), meta.len())));
        }

        for &(column, ref attribute) in &conditions {
            fields.push(parse_field(attribute, &record[column])?);
        }
        let value = parse_field(&decision_attribute, &record[decision_column])?;
        let label = decision_label(&value, &decision_attribute);
        decisions.push(Decision::from_field(&decision_attribute, &value, &label)?);
    }

    let fields = Array::from_shape_vec((decisions.len(), conditions.len()), fields)?;
    let attributes = conditions.into_iter()
                               .map(|(_, a)| a)
                               .collect();

    InformationTable::new(attributes, decision_attribute, fields, decisions)
}

/// Stores the rows of a result, with a header
/// `index;type;minority_decision;majority_decision`.
pub fn store_result<P: AsRef<Path>>(result: &AnalysisResult, path: P) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(RESULT_DELIMITER)
                                         .from_path(path)?;

    if result.is_empty() {
        writer.write_record(&["index", "type", "minority_decision", "majority_decision"])?;
    }
    for row in result.rows() {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Stores every result as `<family>.csv` into `dir`, creating it if needed.
pub fn store_results<P: AsRef<Path>>(results: &AnalysisResults, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    for result in results.iter() {
        store_result(result, dir.join(format!("{}.csv", result.family().name())))?;
    }
    Ok(())
}

/// Stores one summary row per dataset, with a header
/// `name;safe;borderline;rare;outlier`.
pub fn store_summary<P: AsRef<Path>>(rows: &[SummaryRow], path: P) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(RESULT_DELIMITER)
                                         .from_path(path)?;

    if rows.is_empty() {
        writer.write_record(&["name", "safe", "borderline", "rare", "outlier"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Files of `dir` keyed by file stem.
fn files_by_stem(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.insert(stem.to_string(), path.clone());
        }
    }
    Ok(files)
}

/// Pairs metadata and data files sharing a file stem, sorted by name.
///
/// Returns `(dataset name, metadata path, data path)` triples; files
/// without a counterpart are ignored.
pub fn dataset_pairs<P, Q>(metadata_dir: P, data_dir: Q) -> Result<Vec<(String, PathBuf, PathBuf)>>
        where P: AsRef<Path>, Q: AsRef<Path> {
    let metadata = files_by_stem(metadata_dir.as_ref())?;
    let mut data = files_by_stem(data_dir.as_ref())?;

    Ok(metadata.into_iter()
               .filter_map(|(name, m)| data.remove(&name).map(|d| (name, m, d)))
               .collect())
}
