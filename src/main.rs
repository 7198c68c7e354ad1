use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use schola::api::PortalApi;
use schola::identity::{MockDirectory, SessionManager};
use schola::storage::{default_profile_dir, FileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let output = std::env::var("SCHOLA_OUTPUT").unwrap_or_else(|_| "table".to_string());
    let profile_dir = default_profile_dir();
    info!(
        target: "schola",
        "schola starting: RUST_LOG='{}', output={}, profile_dir='{}'",
        rust_log, output, profile_dir.display()
    );

    let store = Arc::new(FileStore::open(&profile_dir)?);
    let directory = Arc::new(MockDirectory::demo());
    let session = Arc::new(SessionManager::new(directory, store));
    session.restore();

    let api = PortalApi::new(session.clone());
    schola::cli::shell::run(session, api).await
}
