use crate::domain::{
    shared::pagination::PaginationParams,
    textile::{
        entity::TextileRecord,
        errors::DomainError,
        facets::{FacetValue, PriceRange},
        filters::SearchFilters,
        query::SortOrder,
        value_objects::{Color, Material},
    },
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Wire form of a search call, shared by the query-string and JSON entry points.
///
/// Enumerated fields arrive as strings so that unknown values surface as
/// validation errors instead of deserialization rejections. Unknown keys are
/// rejected outright: a misspelled filter must not widen the search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    #[serde(alias = "priceMin")]
    pub price_min: Option<f64>,
    #[serde(alias = "priceMax")]
    pub price_max: Option<f64>,
    pub color: Option<String>,
    pub material: Option<String>,
    #[serde(alias = "inStock")]
    pub in_stock: Option<bool>,
    #[serde(alias = "query")]
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SearchRequest {
    pub fn filters(&self) -> Result<SearchFilters, DomainError> {
        Ok(SearchFilters {
            price_min: self.price_min,
            price_max: self.price_max,
            color: non_blank(&self.color).map(str::parse::<Color>).transpose()?,
            material: non_blank(&self.material)
                .map(str::parse::<Material>)
                .transpose()?,
            in_stock: self.in_stock,
            query: self.q.clone(),
        })
    }

    pub fn sort_order(&self) -> Result<SortOrder, DomainError> {
        non_blank(&self.sort)
            .map(str::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// `None` when the caller left both page and limit out.
    pub fn pagination(&self, default_limit: i64) -> Option<PaginationParams> {
        if self.page.is_none() && self.limit.is_none() {
            return None;
        }
        Some(PaginationParams::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(default_limit),
        ))
    }
}

/// Facet lists computed over the filtered but unpaginated result set.
///
/// Each dimension is aggregated with its own filter relaxed: `colors` ignores
/// the color filter, `materials` the material filter and `price_range` the
/// price bounds. All other filters stay applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchFacets {
    pub colors: Vec<FacetValue>,
    pub materials: Vec<FacetValue>,
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchResult {
    pub items: Vec<TextileRecord>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub facets: SearchFacets,
}
