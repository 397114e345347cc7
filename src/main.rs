use crate::app::App;
use crate::config::AppConfig;
use crate::geocoder::NominatimGeocoder;
use crate::router::handle;
use astra::Server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod geocoder;
mod geos;
mod responses;
mod router;
mod spreadsheets;
mod templates;
mod workflow;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "volunteer_directory", about = "Browse and curate volunteer opportunities")]
struct Cli {
    /// Path to the TOML config file. Missing file means defaults.
    #[arg(long, default_value = "volunteer_directory.toml")]
    config: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // 1. Configuration
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            log::error!("invalid bind_addr '{}': {e}", config.bind_addr);
            std::process::exit(1);
        }
    };
    let max_workers = config.max_workers;

    // 2. Geocoder, table file, session database
    let geocoder = match NominatimGeocoder::new(&config.geocoder) {
        Ok(g) => g,
        Err(e) => {
            log::error!("failed to build geocoder client: {e}");
            std::process::exit(1);
        }
    };

    let app = match App::new(config, Box::new(geocoder)) {
        Ok(app) => app,
        Err(e) => {
            log::error!("startup failed: {e}");
            std::process::exit(1);
        }
    };

    match app.purge_sessions(chrono::Utc::now().timestamp()) {
        Ok(0) => {}
        Ok(n) => log::info!("purged {n} expired sessions"),
        Err(e) => log::warn!("session purge failed: {e}"),
    }

    // 3. Serve
    log::info!(
        "serving {} listings at http://{addr}",
        app.store().map(|s| s.len()).unwrap_or(0)
    );

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let path = req.uri().path().to_string();
        match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("{path}: {err}");
                templates::html_error_response(err)
            }
        }
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
