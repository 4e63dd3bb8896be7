//! The `psyche serve` command.

use std::path::PathBuf;

use anyhow::Result;

use psyche_server::config::load_config_from;

pub async fn execute(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    bind: Option<String>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind = bind;
    }

    match config.session_ttl() {
        Some(ttl) => tracing::info!("idle sessions expire after {}s", ttl.as_secs()),
        None => tracing::info!("session expiry disabled"),
    }
    if !config.strict_ratings {
        tracing::warn!("strict_ratings is off; ratings outside 1-5 will be scored as sent");
    }

    psyche_server::serve(config).await
}
