//! Wires settings, dataset, query service and HTTP server together.

use crate::error::SurfsUpError;
use crate::query::QueryService;
use crate::server;
use crate::settings::Settings;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Loads the dataset described by `settings` and serves it until `shutdown` resolves.
///
/// Loading happens before the listener is bound, so a missing or corrupt dataset
/// stops the process at startup instead of serving partial data.
pub async fn run<F>(settings: Settings, shutdown: F) -> Result<(), SurfsUpError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let loader = settings.dataset.loader();
    info!("Loading dataset with {:?}", loader);
    let store = loader.load().await?;
    let service = Arc::new(QueryService::new(store)?);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| SurfsUpError::Bind(address.clone(), e))?;
    server::serve(listener, service, shutdown)
        .await
        .map_err(SurfsUpError::Serve)
}
