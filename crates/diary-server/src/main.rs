// ============================
// diary-server/src/main.rs
// ============================
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use diary_core::auth::TokenKeys;
use diary_core::config::Settings;
use diary_core::store::{FlatFileStore, Store};
use diary_core::{CredentialService, DiaryStore};
use diary_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    // The process entry point owns the store lifecycle; the core only
    // ever sees the shared handle.
    let store: Arc<dyn Store> = Arc::new(FlatFileStore::open(
        &settings.data_dir,
        Duration::from_millis(settings.store_timeout_ms),
    )?);
    let keys = TokenKeys::new(
        settings.token_secret.as_bytes(),
        Duration::from_secs(settings.token_ttl_secs),
    );
    let state = AppState {
        credentials: Arc::new(CredentialService::new(store.clone(), keys)),
        diaries: Arc::new(DiaryStore::new(store)),
    };

    let app = router::create_router(state);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
