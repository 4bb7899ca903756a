//! Server bootstrap: config, rule table, listener.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::triggers::{CLASSIFY_PATH, RuleTable, classify_routes};

/// Read config from the environment and serve until Ctrl-C.
pub async fn run() -> Result<()> {
    let config = ServerConfig::from_env()?;
    serve(config, Arc::new(RuleTable::default_table())).await
}

/// Serve the classifier routes with the given rule table.
pub async fn serve(config: ServerConfig, rules: Arc<RuleTable>) -> Result<()> {
    let addr = config.addr();

    eprintln!("Coach Cards v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Categories: {}", rules.len());
    eprintln!("   Classify: POST http://{}{}", addr, CLASSIFY_PATH);
    eprintln!("   Max upload: {} bytes\n", config.max_body_bytes);

    let app = classify_routes(rules, config.max_body_bytes);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Classifier server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Classifier server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
