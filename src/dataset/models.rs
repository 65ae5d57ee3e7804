//! Data structures shared across the dataset pipeline.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Compiled pattern for closed integer range literals like `22-23`.
static RANGE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Returns the cached range-literal pattern.
fn range_regex() -> &'static Regex {
    RANGE_PATTERN.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").expect("Invalid range pattern"))
}

/// The age coverage a single record claims, parsed once at build time.
///
/// A range with `low > high` is kept as written: it contains no value and
/// contributes nothing to the dense index, but the record stays addressable
/// by its exact label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeSpan {
    /// A single integer age, e.g. `"22"`.
    Single(u32),
    /// A closed integer range, e.g. `"22-23"` covering both endpoints.
    Range { low: u32, high: u32 },
}

impl AgeSpan {
    /// Parse an age label into a span.
    ///
    /// Returns `None` for labels that are neither an integer literal nor a
    /// `lo-hi` range literal (e.g. `"65+"`), which is a valid state: such
    /// records are reachable by exact label only.
    pub fn parse(label: &str) -> Option<Self> {
        if let Some(cap) = range_regex().captures(label) {
            let low = cap[1].parse().ok()?;
            let high = cap[2].parse().ok()?;
            return Some(AgeSpan::Range { low, high });
        }
        label.parse::<u32>().ok().map(AgeSpan::Single)
    }

    /// Whether a queried numeric value falls inside this span.
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            AgeSpan::Single(n) => f64::from(n) == value,
            AgeSpan::Range { low, high } => value >= f64::from(low) && value <= f64::from(high),
        }
    }
}

/// The two per-category metrics carried by every record.
///
/// Empty or non-numeric source fields parse to `None`; the distinction
/// between "absent" and "zero" matters only to the frequency projection,
/// which defaults absent values to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageStats {
    /// Prevalence of use, in percent.
    pub used: Option<f64>,
    /// Median usage frequency.
    pub frequency: Option<f64>,
}

/// One row of the source table.
#[derive(Debug, Clone)]
pub struct Record {
    /// The raw age label as it appears in the source, e.g. `"22"` or `"22-23"`.
    pub label: String,
    /// The span parsed from the label, if it parsed at all.
    pub span: Option<AgeSpan>,
    /// Per-category metrics, keyed by category name.
    pub stats: HashMap<String, UsageStats>,
}

impl Record {
    /// Metrics for one category; missing categories read as empty stats.
    pub fn stats_for(&self, category: &str) -> UsageStats {
        self.stats.get(category).copied().unwrap_or_default()
    }
}

/// Previous/next keys for sequential navigation.
///
/// Either side may be absent (first/last element, or no position at all).
/// On miss pages these can carry sentinel values that intentionally point
/// at other miss pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl Neighbors {
    pub fn none() -> Self {
        Self::default()
    }
}
