use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

use store::{ItemStore, JsonFileStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config".to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("Using {workers} worker threads"));
    } else {
        logger::log_info("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(cfg.storage.file_path());
    store.ensure_storage_exists()?;
    logger::log_debug(&format!("Storage ready at {}", store.path().display()));

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(config::AppState::new(&cfg, Arc::new(store)));

    logger::log_server_start(&addr, &cfg);
    logger::log_info(&format!("Server running on http://{addr}"));
    logger::log_info(&format!(
        "  - Max body size: {} bytes",
        cfg.http.max_body_size
    ));
    logger::log_info(&format!(
        "  - Max connections: {:?}",
        cfg.performance.max_connections
    ));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    server::start_server_loop(listener, state, signals).await?;
    logger::log_shutdown("Server stopped");
    Ok(())
}
