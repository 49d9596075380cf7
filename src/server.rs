//! Server startup: store construction and HTTP/HTTPS binding.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum_server::tls_rustls::RustlsConfig;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::Config;
use crate::store::ModelStore;

/// Run the model file server.
///
/// Binds HTTPS when `tls.enabled` is set and the configured certificate pair
/// loads, plain HTTP otherwise. The handler set is identical either way.
pub async fn run_server(config: Config) -> Result<()> {
    let models_dir = config.models_dir();
    if !models_dir.is_dir() {
        warn!(
            "Model directory {} does not exist; listings will fail until it is created",
            models_dir.display()
        );
    }

    let store = ModelStore::new(models_dir, config.store.extension.clone());
    let app = create_router(store, &config.api);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address '{}:{}'",
                config.server.host, config.server.port
            )
        })?;

    if config.tls.enabled {
        let tls = RustlsConfig::from_pem_file(&config.tls.cert_path, &config.tls.key_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to load TLS credentials from {} and {}",
                    config.tls.cert_path, config.tls.key_path
                )
            })?;

        info!("Model file server listening on https://{}", addr);
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to address '{addr}'"))?;

        info!("Model file server listening on http://{}", addr);
        axum::serve(listener, app).await?;
    }

    info!("Model file server shutting down");
    Ok(())
}
