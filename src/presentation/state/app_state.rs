use std::sync::Arc;

use crate::application::services::DeviationService;

#[derive(Clone)]
pub struct AppState {
    pub deviation_service: Arc<DeviationService>,
    pub api_key: Option<Arc<str>>,
}
