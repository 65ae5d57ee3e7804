//! Resolution of untrusted request keys against the immutable snapshot.
//!
//! Every lookup produces either a resolved record with its navigation
//! neighbors, or a typed miss carrying a human-readable reason and the best
//! prev/next hints available, so navigation stays usable on error pages.
//! No assumption is made about the raw key before validation.

use super::models::{AgeSpan, Neighbors, Record};
use super::nav;
use super::Dataset;

/// A successful age lookup.
#[derive(Debug)]
pub struct ResolvedAge<'a> {
    /// Canonical key: the normalized form of the request. An integer
    /// request that hit a range record keeps its own integer key; an exact
    /// label request keeps the label.
    pub key: String,
    /// The matching source row.
    pub record: &'a Record,
    pub neighbors: Neighbors,
}

/// A successful category lookup.
#[derive(Debug)]
pub struct ResolvedCategory {
    pub key: String,
    pub neighbors: Neighbors,
}

/// A failed lookup. Always recoverable: rendered as a navigable page,
/// never a server fault.
#[derive(Debug)]
pub struct Miss {
    /// The failing raw key as supplied.
    pub key: String,
    pub message: String,
    /// Best-effort hints; on out-of-bounds ages these intentionally include
    /// a dead link that lets the user keep paging into confirmed failure.
    pub neighbors: Neighbors,
}

/// Outcome of an age lookup.
#[derive(Debug)]
pub enum AgeLookup<'a> {
    Resolved(ResolvedAge<'a>),
    NotFound(Miss),
}

/// Outcome of a category lookup.
#[derive(Debug)]
pub enum CategoryLookup {
    Resolved(ResolvedCategory),
    NotFound(Miss),
}

/// Resolve a raw age parameter.
///
/// Order of attempts: exact label match (ranges matched as wholes first),
/// then numeric containment scan in source order (first match wins), then
/// the out-of-bounds and gap policies.
pub fn age<'a>(dataset: &'a Dataset, raw: &str) -> AgeLookup<'a> {
    let ages = dataset.ages();

    if let Some(record) = dataset.records().iter().find(|r| r.label == raw) {
        let neighbors = match record.span {
            Some(AgeSpan::Single(n)) => nav::adjacency(ages.as_slice(), n),
            Some(AgeSpan::Range { low, high }) if low <= high => {
                nav::around_span(ages.as_slice(), low, high)
            }
            _ => Neighbors::none(),
        };
        return AgeLookup::Resolved(ResolvedAge {
            key: record.label.clone(),
            record,
            neighbors,
        });
    }

    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            // Unparseable: point forward at the minimum so the user can
            // jump back into range.
            return AgeLookup::NotFound(Miss {
                key: raw.to_string(),
                message: format!("No data available for age \"{raw}\"."),
                neighbors: Neighbors {
                    prev: None,
                    next: ages.min().map(|n| n.to_string()),
                },
            });
        }
    };

    if let Some(record) = dataset
        .records()
        .iter()
        .find(|r| r.span.is_some_and(|s| s.contains(value)))
    {
        let neighbors = match whole_age(value) {
            Some(n) if ages.contains(n) => nav::adjacency(ages.as_slice(), n),
            _ => nav::flanking(ages.as_slice(), value),
        };
        return AgeLookup::Resolved(ResolvedAge {
            key: format_number(value),
            record,
            neighbors,
        });
    }

    let (Some(min), Some(max)) = (ages.min(), ages.max()) else {
        return AgeLookup::NotFound(Miss {
            key: raw.to_string(),
            message: format!("Error: no data for age {raw}"),
            neighbors: Neighbors::none(),
        });
    };

    if value < f64::from(min) {
        return AgeLookup::NotFound(Miss {
            key: raw.to_string(),
            message: format!("No data available for ages under {min}."),
            neighbors: Neighbors {
                prev: Some(format_number(value - 1.0)),
                next: Some(min.to_string()),
            },
        });
    }

    if value > f64::from(max) {
        return AgeLookup::NotFound(Miss {
            key: raw.to_string(),
            message: format!("No data available for ages over the maximum recorded age ({max})."),
            neighbors: Neighbors {
                prev: Some(max.to_string()),
                next: Some(format_number(value + 1.0)),
            },
        });
    }

    // In bounds but not covered by any record: a gap in the data.
    AgeLookup::NotFound(Miss {
        key: raw.to_string(),
        message: format!("Error: no data for age {raw}"),
        neighbors: nav::flanking(ages.as_slice(), value),
    })
}

/// Resolve a raw category parameter: exact membership, wrap-around hints on
/// failure (distinct from the age out-of-bounds policy).
pub fn category(dataset: &Dataset, raw: &str) -> CategoryLookup {
    let categories = dataset.categories();
    if categories.iter().any(|c| c == raw) {
        CategoryLookup::Resolved(ResolvedCategory {
            key: raw.to_string(),
            neighbors: nav::positional(categories, raw),
        })
    } else {
        CategoryLookup::NotFound(Miss {
            key: raw.to_string(),
            message: "No data available for this drug type.".to_string(),
            neighbors: Neighbors {
                prev: categories.last().cloned(),
                next: categories.first().cloned(),
            },
        })
    }
}

/// Whole non-negative ages convert to the dense index domain.
fn whole_age(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)).then(|| value as u32)
}

/// Render a numeric key the way it navigates: integers without a fraction,
/// anything else in plain decimal form.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
