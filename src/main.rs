use crate::app_config::AppConfig;
use crate::domain::SchoolDirectory;
use crate::domain::events::Event;
use crate::engine::CheckEngine;
use crate::store::Store;
use crate::store_listener::store_listener;
use crate::verifier::{LocalVerifier, ProximityVerifier, RemoteVerifier, new_client};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;

mod app_config;
mod domain;
mod engine;
mod geo;
mod kiosk;
mod proximity;
mod school_loader;
mod store;
mod store_listener;
mod verifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load();
    info!("✅  Loaded configuration");

    let schools = school_loader::load_schools_from(config.schools().directory()).await?;
    let directory = SchoolDirectory::new(schools);
    info!("✅  Loaded {} school(s)", directory.schools().len());

    let (tx, rx) = mpsc::channel::<Event>(config.core().store_buffer_size());
    let mut store = Store::new(rx);
    let notifier_rx = store.notifier();

    task::spawn(async move {
        store_listener(notifier_rx).await;
    });
    info!("✅  Initialized activity log listener");

    task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized activity log store");

    let verifier: Box<dyn ProximityVerifier> = match config.verifier().remote_url() {
        Some(url) => {
            let client = new_client(config.verifier().request_timeout())?;
            info!("✅  Verifying proximity through {}", url);
            Box::new(RemoteVerifier::new(client, url.to_string()))
        }
        None => {
            info!("✅  Verifying proximity in-process");
            Box::new(LocalVerifier::new(config.proximity().threshold_meters()))
        }
    };

    let engine = CheckEngine::new(directory, verifier, tx);
    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    kiosk::run(&engine, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}
