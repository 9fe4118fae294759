use std::sync::Arc;
use wep_model::UriScheme;
use wep_store::TripleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TripleStore>,
    pub uris: Arc<UriScheme>,
}

impl AppState {
    pub fn new(store: Arc<dyn TripleStore>, uris: UriScheme) -> Self {
        Self {
            store,
            uris: Arc::new(uris),
        }
    }
}
