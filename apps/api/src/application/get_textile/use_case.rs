use crate::domain::textile::{
    entity::TextileRecord, errors::DomainError, repository::CatalogStore,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct GetTextileUseCase {
    store: Arc<dyn CatalogStore>,
}

impl GetTextileUseCase {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> Result<TextileRecord, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("textile {}", id)))
    }
}
