use crate::{
    application::{
        get_textile::use_case::GetTextileUseCase,
        search_textiles::use_case::SearchTextilesUseCase,
    },
    config::Config,
    domain::textile::repository::CatalogStore,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub search: Arc<SearchTextilesUseCase>,
    pub get_textile: Arc<GetTextileUseCase>,
    pub config: Config,
}

impl AppState {
    /// Wires the use cases around a store handle owned by the host.
    pub fn new(catalog: Arc<dyn CatalogStore>, config: Config) -> Self {
        Self {
            search: Arc::new(SearchTextilesUseCase::new(
                catalog.clone(),
                config.page_limits(),
            )),
            get_textile: Arc::new(GetTextileUseCase::new(catalog.clone())),
            catalog,
            config,
        }
    }
}
