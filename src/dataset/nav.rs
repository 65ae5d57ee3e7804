//! Sequential neighbor computation over the ordered indices.
//!
//! Ages step through the dense numeric index as array adjacency, which
//! stays correct even if the dense sequence has gaps from malformed
//! ranges. Categories step through insertion order, with no wraparound.

use super::models::Neighbors;

/// Neighbors of an age known to sit in the dense index.
pub fn adjacency(ages: &[u32], age: u32) -> Neighbors {
    match ages.binary_search(&age) {
        Ok(idx) => Neighbors {
            prev: idx.checked_sub(1).map(|i| ages[i].to_string()),
            next: ages.get(idx + 1).map(u32::to_string),
        },
        Err(_) => Neighbors::none(),
    }
}

/// Flanking neighbors of a numeric value absent from the index: the largest
/// element strictly below it and the smallest strictly above it.
pub fn flanking(ages: &[u32], value: f64) -> Neighbors {
    let below = ages.partition_point(|&a| f64::from(a) < value);
    let above = ages.partition_point(|&a| f64::from(a) <= value);
    Neighbors {
        prev: below.checked_sub(1).map(|i| ages[i].to_string()),
        next: ages.get(above).map(u32::to_string),
    }
}

/// Neighbors bracketing a whole range: the element before its low endpoint
/// and the one after its high endpoint.
pub fn around_span(ages: &[u32], low: u32, high: u32) -> Neighbors {
    let below = ages.partition_point(|&a| a < low);
    let above = ages.partition_point(|&a| a <= high);
    Neighbors {
        prev: below.checked_sub(1).map(|i| ages[i].to_string()),
        next: ages.get(above).map(u32::to_string),
    }
}

/// Positional adjacency in an ordered name sequence.
pub fn positional(sequence: &[String], key: &str) -> Neighbors {
    let Some(idx) = sequence.iter().position(|k| k == key) else {
        return Neighbors::none();
    };
    Neighbors {
        prev: idx.checked_sub(1).map(|i| sequence[i].clone()),
        next: sequence.get(idx + 1).cloned(),
    }
}
