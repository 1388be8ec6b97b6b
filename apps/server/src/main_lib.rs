use std::sync::Arc;

use crate::config::Config;
use patrimoine_core::{
    valuation::ValuationEngine, PatrimoineAggregator, PatrimoineService, PatrimoineServiceTrait,
    PossessionService, PossessionServiceTrait,
};
use patrimoine_storage_json::{init, spawn_writer, JsonPossessionRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub possession_service: Arc<dyn PossessionServiceTrait>,
    pub patrimoine_service: Arc<dyn PatrimoineServiceTrait>,
    pub default_owner: String,
    pub max_series_points: usize,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = init(&config.data_path)?;
    tracing::info!("Data file in use: {}", store.path().display());
    let writer = spawn_writer(store.clone());

    let possession_repository = Arc::new(JsonPossessionRepository::new(store, writer));
    let possession_service = Arc::new(PossessionService::new(possession_repository.clone()));

    let aggregator = PatrimoineAggregator::new(ValuationEngine::default());
    let patrimoine_service = Arc::new(PatrimoineService::new(
        possession_repository,
        aggregator,
    ));

    Ok(Arc::new(AppState {
        possession_service,
        patrimoine_service,
        default_owner: config.default_owner.clone(),
        max_series_points: config.max_series_points,
    }))
}
