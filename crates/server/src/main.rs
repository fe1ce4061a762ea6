mod cache;
mod config;
mod http;

use std::time::Duration;

use cache::{spawn_refresh, CatalogCache};
use config::{config_path_from_env, load_or_create_config, resolve_music_root};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = config_path_from_env();
    let (config, created) = load_or_create_config(&config_path)?;
    if created {
        info!("Created default config at {:?}", config_path);
    } else {
        info!("Loaded config from {:?}", config_path);
    }

    let music_root = match resolve_music_root(&config_path, &config.music_root) {
        Some(root) => root,
        None => {
            return Err(
                format!("music_root is not set; edit {}", config_path.display()).into(),
            );
        }
    };

    let cache = CatalogCache::new(music_root.clone());
    info!("Building catalog from {:?}", music_root);
    let startup = cache.clone();
    let (artists, discs) = tokio::task::spawn_blocking(move || startup.refresh()).await??;
    info!("Catalog ready: {} artists, {} discs", artists, discs);

    let refresh_task = spawn_refresh(
        cache.clone(),
        Duration::from_secs(config.refresh_interval_secs),
    );

    let app = http::router(cache);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_task.abort();
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(err) => {
                warn!("Failed to install terminate signal handler: {}", err);
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", err);
        }
    }

    info!("Shutdown signal received; stopping");
}
