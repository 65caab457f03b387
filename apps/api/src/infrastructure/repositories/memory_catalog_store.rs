use crate::domain::textile::{
    entity::TextileRecord,
    errors::DomainError,
    facets::{FacetValue, PriceRange},
    query::{CatalogQuery, FacetField},
    repository::CatalogStore,
};
use anyhow::Context;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Catalog held in process memory.
///
/// Evaluates queries with [`CatalogQuery::matches`] directly. The
/// availability switch makes every call fail with a store error, which is
/// how outages are simulated.
pub struct InMemoryCatalogStore {
    records: RwLock<Vec<TextileRecord>>,
    available: AtomicBool,
}

impl InMemoryCatalogStore {
    pub fn new(records: Vec<TextileRecord>) -> Self {
        info!("Initializing InMemoryCatalogStore with {} records", records.len());
        Self {
            records: RwLock::new(records),
            available: AtomicBool::new(true),
        }
    }

    /// Loads a JSON array of textile records.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog seed {}", path.display()))?;
        let records: Vec<TextileRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse catalog seed {}", path.display()))?;
        Ok(Self::new(records))
    }

    pub fn insert(&self, record: TextileRecord) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::StoreError("catalog lock poisoned".into()))?;
        records.retain(|r| r.id != record.id);
        records.push(record);
        Ok(())
    }

    pub fn set_available(&self, available: bool) {
        if !available {
            warn!("In-memory catalog switched to unavailable");
        }
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::StoreError("catalog store unavailable".into()))
        }
    }

    fn matching(&self, query: &CatalogQuery) -> Result<Vec<TextileRecord>, DomainError> {
        self.ensure_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::StoreError("catalog lock poisoned".into()))?;
        Ok(records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn count(&self, query: &CatalogQuery) -> Result<i64, DomainError> {
        Ok(self.matching(query)?.len() as i64)
    }

    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TextileRecord>, DomainError> {
        let mut matched = self.matching(query)?;
        let sort = query.sort();
        matched.sort_by(|a, b| sort.compare(a, b));

        let page: Vec<TextileRecord> = matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        debug!("In-memory page holds {} textiles", page.len());
        Ok(page)
    }

    async fn facet_counts(
        &self,
        query: &CatalogQuery,
        field: FacetField,
    ) -> Result<Vec<FacetValue>, DomainError> {
        let mut counts: HashMap<&'static str, i64> = HashMap::new();
        for record in self.matching(query)? {
            *counts.entry(field.value_of(&record)).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(value, count)| FacetValue {
                value: value.to_string(),
                count,
            })
            .collect())
    }

    async fn price_range(&self, query: &CatalogQuery) -> Result<Option<PriceRange>, DomainError> {
        let matched = self.matching(query)?;
        let mut prices = matched.iter().map(|r| r.price);
        let Some(first) = prices.next() else {
            return Ok(None);
        };
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Ok(Some(PriceRange { min, max }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TextileRecord>, DomainError> {
        self.ensure_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::StoreError("catalog lock poisoned".into()))?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.ensure_available()
    }
}
