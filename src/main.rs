use anyhow::{Context, Result};
use argus_vision::api::{AppState, RestApi};
use argus_vision::config;
use argus_vision::db::mirror::CameraMirror;
use argus_vision::db::repositories::CamerasRepository;
use argus_vision::db::{FileStore, RecordStore};
use argus_vision::recorder::{RetentionOutcome, StorageCleanupService};
use argus_vision::services::StorageManager;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;

async fn run_app() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.api.log_level.as_str()),
    )
    .init();
    info!("Starting Argus Vision");

    let store = FileStore::open(&config.store.data_file)
        .with_context(|| format!("Failed to open data file {:?}", config.store.data_file))?;
    let records = RecordStore::new(Arc::new(store));
    info!("Record store opened at {}", config.store.data_file.display());

    // Cold-start retention sweep
    match StorageCleanupService::new(records.clone()).apply_retention_policy() {
        RetentionOutcome::Pruned { kept, removed } => {
            info!("Retention sweep removed {} recordings, {} kept", removed, kept)
        }
        outcome => info!("Retention sweep finished: {:?}", outcome),
    }

    // The store is authoritative; refresh the mirror before serving it
    let mirror = Arc::new(CameraMirror::new(&config.store.mirror_file));
    mirror.save_cameras(&CamerasRepository::new(records.clone()).get_all());

    let state = AppState {
        mirror,
        storage: Arc::new(StorageManager::new(
            records.clone(),
            config.store.quota_bytes(),
        )),
    };

    let api = RestApi::new(&config.api, state);
    api.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutting down...");
    })
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("Application error: {:#}", e);
        std::process::exit(1);
    }
}
