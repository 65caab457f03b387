use super::dto::{SearchFacets, SearchRequest, SearchResult};
use crate::domain::{
    shared::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginationParams, total_pages},
    textile::{
        errors::DomainError,
        facets::sort_buckets,
        filters::SearchFilters,
        query::{CatalogQuery, Dimension, FacetField, SortOrder},
        repository::CatalogStore,
    },
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Store calls one search issues concurrently. Against Postgres each holds a
/// pooled connection until it completes.
pub const STORE_CALLS_PER_SEARCH: u32 = 5;

/// Page size policy enforced by the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            max_limit: MAX_PAGE_SIZE,
        }
    }
}

/// Translates optional filters into a paginated, faceted catalog search.
///
/// Holds no mutable state; the store handle is injected by the host and may
/// be shared across any number of concurrent searches.
pub struct SearchTextilesUseCase {
    store: Arc<dyn CatalogStore>,
    limits: PageLimits,
}

impl SearchTextilesUseCase {
    pub fn new(store: Arc<dyn CatalogStore>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub async fn execute(&self, request: SearchRequest) -> Result<SearchResult, DomainError> {
        let filters = request.filters()?;
        let sort = request.sort_order()?;
        let pagination = request.pagination(self.limits.default_limit);
        self.search(&filters, sort, pagination).await
    }

    /// Runs one search.
    ///
    /// Count, page, facets and price range are fetched concurrently; the first
    /// failure aborts the rest and fails the whole call.
    ///
    /// # Errors
    /// - `DomainError::ValidationError` for out-of-range pagination or filters
    /// - `DomainError::StoreError` when any store call fails or the store
    ///   returns more items than requested
    #[instrument(skip(self, filters), fields(sort = sort.as_str()))]
    pub async fn search(
        &self,
        filters: &SearchFilters,
        sort: SortOrder,
        pagination: Option<PaginationParams>,
    ) -> Result<SearchResult, DomainError> {
        let pagination =
            pagination.unwrap_or_else(|| PaginationParams::new(1, self.limits.default_limit));
        pagination.validate(self.limits.max_limit)?;
        filters.ensure_valid()?;

        let query = filters
            .predicates()
            .into_iter()
            .fold(CatalogQuery::new().sorted_by(sort), CatalogQuery::narrow);
        let color_query = query.relaxing(Dimension::Color);
        let material_query = query.relaxing(Dimension::Material);
        let price_query = query.relaxing(Dimension::Price);

        debug!(
            "Searching with {} predicates, page={}, limit={}",
            query.predicates().len(),
            pagination.page,
            pagination.limit
        );

        let (total, items, mut colors, mut materials, price_range) = tokio::try_join!(
            self.store.count(&query),
            self.store
                .fetch_page(&query, pagination.limit, pagination.offset()),
            self.store.facet_counts(&color_query, FacetField::Color),
            self.store.facet_counts(&material_query, FacetField::Material),
            self.store.price_range(&price_query),
        )?;

        if items.len() as i64 > pagination.limit {
            warn!(
                "Catalog store returned {} items for a page of {}",
                items.len(),
                pagination.limit
            );
            return Err(DomainError::StoreError(format!(
                "store returned {} items for a page of {}",
                items.len(),
                pagination.limit
            )));
        }

        sort_buckets(&mut colors);
        sort_buckets(&mut materials);

        debug!("Search matched {} records, returning {}", total, items.len());

        Ok(SearchResult {
            items,
            total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: total_pages(total, pagination.limit),
            facets: SearchFacets {
                colors,
                materials,
                price_range,
            },
        })
    }
}
