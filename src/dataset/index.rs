//! Index derivation: category extraction, record typing, and the dense
//! age domain that prev/next navigation walks.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use super::models::{AgeSpan, Record, UsageStats};
use super::table::RawTable;

/// Suffix that marks a prevalence column and names its category.
const USE_SUFFIX: &str = "_use";
/// Suffix of the companion frequency column.
const FREQUENCY_SUFFIX: &str = "_frequency";

/// Extract category names from the header, in first-seen order.
///
/// Every field ending in `_use` names a category; this is the authoritative
/// category set for the process lifetime, and its order is also the
/// prev/next navigation order for category pages.
pub fn extract_categories(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter_map(|h| h.strip_suffix(USE_SUFFIX))
        .map(str::to_string)
        .collect()
}

/// Turn raw rows into typed records.
///
/// The age label is parsed once; metric fields parse to `Option<f64>`
/// (finite values only) so requests never re-interpret raw strings. Every
/// known category gets a stats entry, empty when its columns are absent.
pub fn build_records(table: &RawTable, categories: &[String], age_column: usize) -> Vec<Record> {
    let columns: HashMap<&str, usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            let label = row[age_column].clone();
            let span = AgeSpan::parse(&label);
            let stats = categories
                .iter()
                .map(|category| {
                    let used = metric(row, &columns, &format!("{category}{USE_SUFFIX}"));
                    let frequency =
                        metric(row, &columns, &format!("{category}{FREQUENCY_SUFFIX}"));
                    (category.clone(), UsageStats { used, frequency })
                })
                .collect();
            Record { label, span, stats }
        })
        .collect()
}

/// Read one metric field as a finite number, or `None`.
fn metric(row: &[String], columns: &HashMap<&str, usize>, name: &str) -> Option<f64> {
    let field = columns.get(name).map(|&i| row[i].as_str())?;
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The dense, strictly increasing sequence of every integer age covered by
/// the records.
///
/// A range record contributes every integer in `[low, high]`; a scalar
/// record contributes its single integer. This is the canonical age domain
/// for bounds checks and neighbor navigation, distinct from the raw labels
/// in the source rows.
#[derive(Debug, Clone)]
pub struct AgeIndex {
    ages: Vec<u32>,
}

impl AgeIndex {
    /// Densify all record spans into the sorted, deduplicated age domain.
    pub fn build(records: &[Record]) -> Self {
        let mut ages = BTreeSet::new();
        for record in records {
            match record.span {
                Some(AgeSpan::Single(n)) => {
                    ages.insert(n);
                }
                Some(AgeSpan::Range { low, high }) => {
                    if low > high {
                        warn!(
                            "age range \"{}\" has inverted bounds, contributing no ages",
                            record.label
                        );
                        continue;
                    }
                    ages.extend(low..=high);
                }
                None => {
                    debug!("age label \"{}\" is not numeric, left out of the dense index", record.label);
                }
            }
        }
        Self {
            ages: ages.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    /// The ascending age sequence.
    pub fn as_slice(&self) -> &[u32] {
        &self.ages
    }

    /// Smallest covered age.
    pub fn min(&self) -> Option<u32> {
        self.ages.first().copied()
    }

    /// Largest covered age.
    pub fn max(&self) -> Option<u32> {
        self.ages.last().copied()
    }

    pub fn contains(&self, age: u32) -> bool {
        self.ages.binary_search(&age).is_ok()
    }

    /// The canonical keys, rendered back to strings in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.ages.iter().map(u32::to_string)
    }
}
