//! Best-effort image lookup for the report pages.
//!
//! Lookup is an ordered list of named strategies, each returning an
//! optional path, evaluated in sequence:
//!
//! 1. [`exact_age_file`] - a file named `age<value>*` in a photo directory
//! 2. [`age_directory`] - a directory named `Age<value>`, first image inside
//! 3. [`bucket_fallback`] - the same directory search for a coarse age bucket
//!
//! Any filesystem error along the way reads as "not found" for that key.
//! Image resolution must never abort startup: absence is a valid state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

/// File extensions accepted as page imagery.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Subdirectory of the image root holding age imagery. Deployments often
/// nest a second `AgePhotos` inside it; both levels are searched.
const AGE_PHOTOS_DIR: &str = "AgePhotos";
/// Subdirectory of the image root holding category imagery, same nesting.
const DRUG_PHOTOS_DIR: &str = "DrugPhotos";

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Directory entries sorted by name; errors collapse to an empty listing.
fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();
    paths
}

fn file_name_lower(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// First image file directly inside a directory.
fn first_image_in(dir: &Path) -> Option<PathBuf> {
    list_dir(dir).into_iter().find(|p| is_image(p))
}

/// Tier 1: a file whose name starts with `age<key>` (case-insensitive).
fn exact_age_file(dir: &Path, key: &str) -> Option<PathBuf> {
    let prefix = format!("age{key}").to_lowercase();
    list_dir(dir)
        .into_iter()
        .find(|p| is_image(p) && file_name_lower(p).starts_with(&prefix))
}

/// Tier 2: a subdirectory literally named `Age<key>`, first image inside.
fn age_directory(dir: &Path, key: &str) -> Option<PathBuf> {
    let wanted = format!("age{key}").to_lowercase();
    list_dir(dir)
        .into_iter()
        .find(|p| p.is_dir() && file_name_lower(p) == wanted)
        .and_then(|sub| first_image_in(&sub))
}

/// Coarse bucket folder for ages with no dedicated imagery.
fn bucket_name(age: u32) -> &'static str {
    if age <= 19 {
        "Age19"
    } else if (26..=29).contains(&age) {
        "Age26-29"
    } else if (50..=64).contains(&age) {
        "Age50-64"
    } else if age >= 65 {
        "Age65+"
    } else {
        "Age26-29"
    }
}

/// Tier 3: first image in the bucket's canonical folder.
fn bucket_fallback(age_root: &Path, age: u32) -> Option<PathBuf> {
    let bucket = bucket_name(age);
    first_image_in(&age_root.join(AGE_PHOTOS_DIR).join(bucket))
        .or_else(|| first_image_in(&age_root.join(bucket)))
}

/// Resolve the image for one age key, walking the tiers in order.
///
/// The key may be a canonical age or a raw range label; the bucket tier
/// only applies when the key is a single integer.
pub fn find_age_image(root: &Path, key: &str) -> Option<PathBuf> {
    let age_root = root.join(AGE_PHOTOS_DIR);
    let dirs = [age_root.join(AGE_PHOTOS_DIR), age_root.clone()];
    for dir in &dirs {
        if let Some(found) = exact_age_file(dir, key).or_else(|| age_directory(dir, key)) {
            return Some(found);
        }
    }
    let age = key.parse::<u32>().ok()?;
    bucket_fallback(&age_root, age)
}

/// Resolve the image for a category: any image file whose name contains the
/// category string (case-insensitive), nested photo directory first.
pub fn find_category_image(root: &Path, category: &str) -> Option<PathBuf> {
    let cat_root = root.join(DRUG_PHOTOS_DIR);
    let needle = category.to_lowercase();
    let dirs = [cat_root.join(DRUG_PHOTOS_DIR), cat_root];
    dirs.iter().find_map(|dir| {
        list_dir(dir)
            .into_iter()
            .find(|p| is_image(p) && file_name_lower(p).contains(&needle))
    })
}

/// Render a found path relative to the image root, with URL separators.
fn relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Image paths for every age key. `None` is the valid absent state.
pub fn age_image_map(root: &Path, keys: &[String]) -> HashMap<String, Option<String>> {
    keys.iter()
        .map(|key| {
            let found = find_age_image(root, key).map(|p| relative(root, &p));
            if found.is_none() {
                debug!("no image found for age {key}");
            }
            (key.clone(), found)
        })
        .collect()
}

/// Image paths for every category. `None` is the valid absent state.
pub fn category_image_map(root: &Path, categories: &[String]) -> HashMap<String, Option<String>> {
    categories
        .iter()
        .map(|category| {
            let found = find_category_image(root, category).map(|p| relative(root, &p));
            if found.is_none() {
                debug!("no image found for category {category}");
            }
            (category.clone(), found)
        })
        .collect()
}
