//! Core dataset pipeline: ingestion, index derivation, and key resolution.

pub mod error;
pub mod models;
mod images;
mod index;
mod nav;
mod resolve;
mod table;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;

pub use error::{DatasetError, Result};
pub use index::AgeIndex;
pub use models::{AgeSpan, Neighbors, Record, UsageStats};
pub use resolve::{AgeLookup, CategoryLookup, Miss, ResolvedAge, ResolvedCategory};

/// Name of the required age column in the source table.
const AGE_COLUMN: &str = "age";

/// The immutable snapshot every request handler reads from.
///
/// Built exactly once at start-up from the source table and the asset
/// directories; nothing mutates it afterwards. Construction failure is
/// fatal by design: a process that cannot build the snapshot must not
/// start serving.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Record>,
    categories: Vec<String>,
    ages: AgeIndex,
    age_images: HashMap<String, Option<String>>,
    category_images: HashMap<String, Option<String>>,
}

impl Dataset {
    /// Parse the source table and derive every index.
    ///
    /// # Arguments
    /// * `table_path` - Path to the comma-separated source table
    /// * `image_root` - Directory holding the `AgePhotos` and `DrugPhotos`
    ///   roots; may be missing entirely (all images resolve to absent)
    ///
    /// # Errors
    /// Returns an error if the table cannot be read, has no `age` column,
    /// or parses to zero records. Image search never fails.
    pub fn load(table_path: impl AsRef<Path>, image_root: impl AsRef<Path>) -> Result<Self> {
        let table_path = table_path.as_ref();
        info!("Loading source table: {}", table_path.display());
        let text = fs::read_to_string(table_path).map_err(|source| {
            DatasetError::SourceUnreadable {
                path: table_path.to_path_buf(),
                source,
            }
        })?;

        let raw = table::parse(&text);
        if raw.rows.is_empty() {
            return Err(DatasetError::EmptyTable {
                path: table_path.to_path_buf(),
            });
        }
        let age_column = raw.column(AGE_COLUMN).ok_or_else(|| {
            DatasetError::MissingAgeColumn {
                path: table_path.to_path_buf(),
            }
        })?;

        let categories = index::extract_categories(&raw.headers);
        let records = index::build_records(&raw, &categories, age_column);
        let ages = AgeIndex::build(&records);

        info!(
            "Loaded {} records, {} categories, {} distinct ages",
            records.len(),
            categories.len(),
            ages.len()
        );

        // Image keys cover the canonical ages plus the raw row labels, so
        // range and open-ended pages can carry imagery of their own.
        let mut age_keys: Vec<String> = ages.keys().collect();
        for record in &records {
            if !age_keys.iter().any(|k| k == &record.label) {
                age_keys.push(record.label.clone());
            }
        }

        let image_root = image_root.as_ref();
        let age_images = images::age_image_map(image_root, &age_keys);
        let category_images = images::category_image_map(image_root, &categories);

        Ok(Self {
            records,
            categories,
            ages,
            age_images,
            category_images,
        })
    }

    /// All source rows, in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Category names in header order; also the category navigation order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The dense canonical age domain.
    pub fn ages(&self) -> &AgeIndex {
        &self.ages
    }

    /// Image path for a canonical age, relative to the image root.
    pub fn age_image(&self, key: &str) -> Option<&str> {
        self.age_images.get(key).and_then(|p| p.as_deref())
    }

    /// Image path for a category, relative to the image root.
    pub fn category_image(&self, key: &str) -> Option<&str> {
        self.category_images.get(key).and_then(|p| p.as_deref())
    }

    /// Resolve a raw age parameter to a record or a navigable miss.
    pub fn resolve_age(&self, raw: &str) -> AgeLookup<'_> {
        resolve::age(self, raw)
    }

    /// Resolve a raw category parameter to a column or a navigable miss.
    pub fn resolve_category(&self, raw: &str) -> CategoryLookup {
        resolve::category(self, raw)
    }

    /// Positive use values of one record, in category order.
    ///
    /// Zero and absent values are omitted; this is the per-age chart data.
    pub fn positive_use_by_category(&self, record: &Record) -> Vec<(String, f64)> {
        self.categories
            .iter()
            .filter_map(|category| {
                record
                    .stats_for(category)
                    .used
                    .filter(|v| *v > 0.0)
                    .map(|v| (category.clone(), v))
            })
            .collect()
    }

    /// Positive use values of one category across all rows, keyed by the
    /// raw row label. Zero and absent values are omitted.
    pub fn positive_use_by_age(&self, category: &str) -> Vec<(String, f64)> {
        self.records
            .iter()
            .filter_map(|record| {
                record
                    .stats_for(category)
                    .used
                    .filter(|v| *v > 0.0)
                    .map(|v| (record.label.clone(), v))
            })
            .collect()
    }

    /// Frequency values of one category across all rows, keyed by the raw
    /// row label, with absent values defaulted to zero.
    pub fn frequency_by_age(&self, category: &str) -> Vec<(String, f64)> {
        self.records
            .iter()
            .map(|record| {
                let v = record.stats_for(category).frequency.unwrap_or(0.0);
                (record.label.clone(), v)
            })
            .collect()
    }
}
