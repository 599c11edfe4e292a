use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::responses::error_response;
use crate::router::{handle, wants_html};
use astra::Server;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod db;
mod directory;
mod domain;
mod errors;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "job_map=info".into()),
        )
        .with_target(true)
        .init();
}

fn main() {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        tracing::error!(error = %e, "Database initialization failed");
        std::process::exit(1);
    }

    // 2️⃣ Build the map from whatever is stored
    let app = match App::new(&config, db) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    tracing::info!(addr = %config.addr, max_workers = config.max_workers, "Starting server");
    let server = Server::bind(&config.addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| {
        let as_html = wants_html(&req);
        match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => error_response(&err, as_html),
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "Server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
