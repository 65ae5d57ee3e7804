use std::path::PathBuf;

use drug_use_viewer::dataset::{AgeLookup, CategoryLookup, Dataset, DatasetError};

fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures_src");
    for part in parts {
        p.push(part);
    }
    p
}

fn load_usage() -> Dataset {
    Dataset::load(fixture_path(&["usage.csv"]), fixture_path(&["img"])).expect("load usage fixture")
}

fn resolved(dataset: &Dataset, raw: &str) -> (String, String, Option<String>, Option<String>) {
    match dataset.resolve_age(raw) {
        AgeLookup::Resolved(hit) => (
            hit.key.clone(),
            hit.record.label.clone(),
            hit.neighbors.prev.clone(),
            hit.neighbors.next.clone(),
        ),
        AgeLookup::NotFound(miss) => panic!("expected {} to resolve, got miss: {}", raw, miss.message),
    }
}

fn missed(dataset: &Dataset, raw: &str) -> (String, Option<String>, Option<String>) {
    match dataset.resolve_age(raw) {
        AgeLookup::NotFound(miss) => (miss.message, miss.neighbors.prev, miss.neighbors.next),
        AgeLookup::Resolved(hit) => panic!("expected {} to miss, resolved to {}", raw, hit.key),
    }
}

#[test]
fn age_index_expands_ranges_densely() {
    let dataset = load_usage();
    let keys: Vec<String> = dataset.ages().keys().collect();
    assert_eq!(keys, ["12", "13", "14", "17", "18", "19", "20", "22", "23"]);

    let ages = dataset.ages().as_slice();
    for win in ages.windows(2) {
        assert!(win[0] < win[1], "index not strictly increasing: {:?}", win);
    }
}

#[test]
fn contained_age_resolves_through_the_range_record() {
    let dataset = load_usage();
    let (key, label, prev, next) = resolved(&dataset, "20");
    assert_eq!(key, "20");
    assert_eq!(label, "19-20");
    assert_eq!(prev.as_deref(), Some("19"));
    assert_eq!(next.as_deref(), Some("22"));
}

#[test]
fn exact_range_label_matches_as_a_whole() {
    let dataset = load_usage();
    let (key, label, prev, next) = resolved(&dataset, "19-20");
    assert_eq!(key, "19-20");
    assert_eq!(label, "19-20");
    assert_eq!(prev.as_deref(), Some("18"), "element before the range's low end");
    assert_eq!(next.as_deref(), Some("22"), "element after the range's high end");
}

#[test]
fn non_numeric_labels_stay_reachable_by_exact_match() {
    let dataset = load_usage();
    let (key, label, prev, next) = resolved(&dataset, "65+");
    assert_eq!(key, "65+");
    assert_eq!(label, "65+");
    assert_eq!(prev, None);
    assert_eq!(next, None);
}

#[test]
fn resolution_is_idempotent_on_canonical_keys() {
    let dataset = load_usage();
    for raw in ["12", "20", "19-20", "65+"] {
        let (key, label, _, _) = resolved(&dataset, raw);
        let (again_key, again_label, _, _) = resolved(&dataset, &key);
        assert_eq!(key, again_key, "canonical key drifted for {}", raw);
        assert_eq!(label, again_label, "record drifted for {}", raw);
    }
}

#[test]
fn neighbor_round_trip_holds_across_the_dense_index() {
    let dataset = load_usage();
    for key in dataset.ages().keys() {
        let (_, _, prev, next) = resolved(&dataset, &key);
        if let Some(prev) = prev {
            let (_, _, _, back) = resolved(&dataset, &prev);
            assert_eq!(back.as_deref(), Some(key.as_str()), "next(prev({})) != {}", key, key);
        }
        if let Some(next) = next {
            let (_, _, forward, _) = resolved(&dataset, &next);
            assert_eq!(forward.as_deref(), Some(key.as_str()), "prev(next({})) != {}", key, key);
        }
    }
}

#[test]
fn below_minimum_keeps_a_dead_backward_link() {
    let dataset = load_usage();
    let (message, prev, next) = missed(&dataset, "5");
    assert_eq!(message, "No data available for ages under 12.");
    assert_eq!(prev.as_deref(), Some("4"));
    assert_eq!(next.as_deref(), Some("12"));
}

#[test]
fn above_maximum_keeps_a_dead_forward_link() {
    let dataset = load_usage();
    let (message, prev, next) = missed(&dataset, "99");
    assert_eq!(
        message,
        "No data available for ages over the maximum recorded age (23)."
    );
    assert_eq!(prev.as_deref(), Some("23"));
    assert_eq!(next.as_deref(), Some("100"));
}

#[test]
fn unparseable_age_points_back_at_the_minimum() {
    let dataset = load_usage();
    let (message, prev, next) = missed(&dataset, "abc");
    assert_eq!(message, "No data available for age \"abc\".");
    assert_eq!(prev, None);
    assert_eq!(next.as_deref(), Some("12"));
}

#[test]
fn gaps_inside_the_domain_get_flanking_hints() {
    let dataset = load_usage();
    let (message, prev, next) = missed(&dataset, "15");
    assert_eq!(message, "Error: no data for age 15");
    assert_eq!(prev.as_deref(), Some("14"));
    assert_eq!(next.as_deref(), Some("17"));
}

#[test]
fn categories_keep_header_order_and_positional_neighbors() {
    let dataset = load_usage();
    let categories: Vec<&str> = dataset.categories().iter().map(String::as_str).collect();
    assert_eq!(categories, ["alcohol", "cocaine", "heroin"]);

    match dataset.resolve_category("cocaine") {
        CategoryLookup::Resolved(hit) => {
            assert_eq!(hit.key, "cocaine");
            assert_eq!(hit.neighbors.prev.as_deref(), Some("alcohol"));
            assert_eq!(hit.neighbors.next.as_deref(), Some("heroin"));
        }
        CategoryLookup::NotFound(miss) => panic!("cocaine should resolve: {}", miss.message),
    }
}

#[test]
fn unknown_category_wraps_its_hints() {
    let dataset = load_usage();
    match dataset.resolve_category("meth") {
        CategoryLookup::NotFound(miss) => {
            assert_eq!(miss.message, "No data available for this drug type.");
            assert_eq!(miss.neighbors.prev.as_deref(), Some("heroin"));
            assert_eq!(miss.neighbors.next.as_deref(), Some("alcohol"));
        }
        CategoryLookup::Resolved(hit) => panic!("meth should not resolve, got {}", hit.key),
    }
}

#[test]
fn projections_omit_zero_and_absent_values() {
    let dataset = load_usage();

    let record = match dataset.resolve_age("13") {
        AgeLookup::Resolved(hit) => hit.record,
        AgeLookup::NotFound(miss) => panic!("13 should resolve: {}", miss.message),
    };
    // heroin use is 0 for age 13 and must be omitted
    assert_eq!(
        dataset.positive_use_by_category(record),
        vec![("alcohol".to_string(), 8.5), ("cocaine".to_string(), 0.1)]
    );

    let by_age = dataset.positive_use_by_age("heroin");
    assert!(by_age.iter().all(|(label, _)| label != "13" && label != "65+"));
    assert!(by_age.contains(&("19-20".to_string(), 0.4)));

    // frequency keeps every row, defaulting absent values to zero
    let frequencies = dataset.frequency_by_age("heroin");
    assert_eq!(frequencies.len(), dataset.records().len());
    assert!(frequencies.contains(&("13".to_string(), 0.0)));
    assert!(frequencies.contains(&("12".to_string(), 35.5)));
}

#[test]
fn range_containment_works_end_to_end() {
    let dataset = Dataset::load(fixture_path(&["minimal.csv"]), fixture_path(&["no-such-dir"]))
        .expect("load minimal fixture");

    let keys: Vec<String> = dataset.ages().keys().collect();
    assert_eq!(keys, ["18", "19", "20"]);

    let (key, label, prev, next) = resolved(&dataset, "20");
    assert_eq!(key, "20");
    assert_eq!(label, "19-20");
    assert_eq!(prev.as_deref(), Some("19"));
    assert_eq!(next, None);

    let record = dataset.records().iter().find(|r| r.label == "19-20").unwrap();
    assert_eq!(
        dataset.positive_use_by_category(record),
        vec![("cocaine".to_string(), 2.5)]
    );
}

#[test]
fn image_tiers_resolve_in_order() {
    let dataset = load_usage();

    // Tier 1: exact file under the nested photo directory
    assert_eq!(dataset.age_image("18"), Some("AgePhotos/AgePhotos/Age18.jpg"));
    // Tier 1 also serves raw range labels and their endpoints by prefix
    assert_eq!(
        dataset.age_image("22-23"),
        Some("AgePhotos/AgePhotos/Age22-23.jpg")
    );
    assert_eq!(
        dataset.age_image("22"),
        Some("AgePhotos/AgePhotos/Age22-23.jpg")
    );
    // Tier 2: directory named after the age
    assert_eq!(dataset.age_image("19"), Some("AgePhotos/Age19/portrait.png"));
    // Tier 3: coarse bucket folders
    assert_eq!(dataset.age_image("12"), Some("AgePhotos/Age19/portrait.png"));
    assert_eq!(dataset.age_image("20"), Some("AgePhotos/Age26-29/adults.jpg"));

    // Categories match by substring, images only
    assert_eq!(
        dataset.category_image("cocaine"),
        Some("DrugPhotos/DrugPhotos/cocaine-lines.webp")
    );
    assert_eq!(dataset.category_image("heroin"), None);
}

#[test]
fn missing_image_root_resolves_everything_to_absent() {
    let dataset = Dataset::load(fixture_path(&["usage.csv"]), fixture_path(&["no-such-dir"]))
        .expect("image search must not fail startup");
    for key in dataset.ages().keys() {
        assert_eq!(dataset.age_image(&key), None);
    }
    for category in dataset.categories() {
        assert_eq!(dataset.category_image(category), None);
    }
}

#[test]
fn initialization_failures_are_fatal_and_typed() {
    let missing = Dataset::load(fixture_path(&["does-not-exist.csv"]), fixture_path(&["img"]));
    assert!(matches!(
        missing,
        Err(DatasetError::SourceUnreadable { .. })
    ));

    let empty = Dataset::load(fixture_path(&["empty.csv"]), fixture_path(&["img"]));
    assert!(matches!(empty, Err(DatasetError::EmptyTable { .. })));

    let no_age = Dataset::load(fixture_path(&["no_age.csv"]), fixture_path(&["img"]));
    assert!(matches!(no_age, Err(DatasetError::MissingAgeColumn { .. })));
}
