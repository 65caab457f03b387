use super::entity::TextileRecord;
use super::errors::DomainError;
use super::facets::{FacetValue, PriceRange};
use super::query::{CatalogQuery, FacetField};
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the textile catalog.
///
/// Implementations must apply a query's predicates with the semantics of
/// [`CatalogQuery::matches`] and order pages by [`CatalogQuery::sort`].
/// Any failure to reach the store or to map its data is a
/// [`DomainError::StoreError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn count(&self, query: &CatalogQuery) -> Result<i64, DomainError>;
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TextileRecord>, DomainError>;
    /// Distinct values of `field` among matching records, with counts.
    async fn facet_counts(
        &self,
        query: &CatalogQuery,
        field: FacetField,
    ) -> Result<Vec<FacetValue>, DomainError>;
    /// `None` when nothing matches.
    async fn price_range(&self, query: &CatalogQuery) -> Result<Option<PriceRange>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TextileRecord>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
