use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// One facet bucket: a distinct attribute value and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, TS)]
#[ts(export)]
pub struct FacetValue {
    pub value: String,
    pub count: i64,
}

/// Cheapest and dearest price in a result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Orders buckets by descending count, then by value, so facet lists are
/// stable across stores.
pub fn sort_buckets(buckets: &mut [FacetValue]) {
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
}
