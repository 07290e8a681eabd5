use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

mod handlers;
mod state;

use crate::handlers::{config_handler, ping_handler, root_handler};
use crate::state::{load_config, AppState};

/// Serves the lasso demo page, the wasm bundle and the lasso options.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    public_dir: Option<PathBuf>,
    /// JSON file with lasso options (`closePathDistance`, `hoverSelect`, ...).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()).await {
        Ok(config) => config,
        Err(error) => {
            log::error!("Invalid lasso config: {error}");
            std::process::exit(2);
        }
    };
    log::info!(
        "Lasso options: close distance {}, loop select {}, hover select {}",
        config.close_path_distance,
        config.close_path_select,
        config.hover_select
    );

    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));
    let index_file = public_dir.join("index.html");
    let state = AppState { config };

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
        .route("/config.json", get(config_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(axum::Extension(index_file))
        .with_state(state);

    let port: u16 = args.port.unwrap_or_else(|| {
        std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3000)
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Lasso demo running at http://localhost:{port}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server");
    axum::serve(listener, app).await.expect("Server crashed");
}
