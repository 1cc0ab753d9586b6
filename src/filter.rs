//! Attribute filter engine.
//!
//! Narrows the base dataset to the features whose attribute named by the
//! selected category equals the selected value. Matching is exact string
//! equality: no case folding, no trimming, and non-string attribute values
//! never match.

use crate::model::{FilterCategory, PointCollection};

/// Keep every feature whose `category` attribute equals `value`, in base order.
///
/// Deterministic and idempotent; `base` is never modified.
pub fn filter(base: &PointCollection, category: FilterCategory, value: &str) -> PointCollection {
    let attribute = category.attribute();
    let filtered: PointCollection = base
        .iter()
        .filter(|feature| feature.attribute_str(attribute) == Some(value))
        .cloned()
        .collect();

    log::debug!(
        "Filter {}={} kept {} of {} features",
        attribute,
        value,
        filtered.len(),
        base.len()
    );
    filtered
}
