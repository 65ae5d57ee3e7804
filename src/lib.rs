//! # drug-use-viewer
//!
//! Ingests an age-bucketed substance-use table once at start-up, derives
//! dense navigation indices from it, and resolves untrusted path keys to
//! dataset rows and columns for navigable report pages.
//!
//! The [`dataset`] module is the core: parsing, index derivation, key
//! resolution and neighbor navigation over an immutable snapshot. The
//! [`web`] module is a thin HTTP wrapper around the core's outputs.
pub mod dataset;
pub mod web;

// Re-export the main types for convenience
pub use dataset::{
    AgeIndex, AgeLookup, AgeSpan, CategoryLookup, Dataset, DatasetError, Miss, Neighbors, Record,
    ResolvedAge, ResolvedCategory, UsageStats,
};
