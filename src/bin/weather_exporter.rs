//! weather_exporter - serve current weather as Prometheus metrics
//!
//! Usage:
//!   weather_exporter --config exporter.toml
//!   weather_exporter --config exporter.toml --listen 127.0.0.1:9000
//!
//! Set RUST_LOG (e.g. `RUST_LOG=debug`) to change the log level; the default is `info`.

use argh::FromArgs;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use weather_exporter::{
    ExporterConfig, ExporterError, PollingWorkflow, PrometheusSink, WeatherClient,
};

/// Poll current weather for configured locations and export it as Prometheus metrics
#[derive(FromArgs)]
struct Args {
    /// path to the TOML configuration file
    #[argh(option, short = 'c')]
    config: PathBuf,

    /// address to serve /metrics on, overrides `listen_addr` from the config file
    #[argh(option, short = 'l')]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ExporterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let config = ExporterConfig::from_file(&args.config)?;
    let listen = args.listen.unwrap_or_else(|| config.listen_addr.clone());
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| ExporterError::ListenAddr(listen.clone(), e))?;

    let sink = Arc::new(PrometheusSink::new()?);
    let client = WeatherClient::builder()
        .base_url(config.api_base_url.clone())
        .maybe_timeout(config.request_timeout())
        .build()
        .map_err(ExporterError::HttpClient)?;
    let workflow = PollingWorkflow::builder()
        .locations(config.location_source()?)
        .client(client)
        .sink(sink.clone())
        .interval(config.interval())
        .health_rule(config.api_health)
        .build();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ExporterError::Server(addr, e))?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown requested");
                    shutdown.cancel();
                }
                Err(e) => error!("Failed to listen for Ctrl-C: {:?}", e),
            }
        }
    });

    let poller = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { workflow.run(shutdown).await }
    });

    let app = Router::new()
        .route("/metrics", get(metrics))
        .with_state(sink);

    info!("Serving metrics on http://{}/metrics", addr);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.cancelled().await }
        })
        .await
        .map_err(|e| ExporterError::Server(addr, e));

    shutdown.cancel();
    poller.await?;
    served
}

async fn metrics(State(sink): State<Arc<PrometheusSink>>) -> Response {
    match sink.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, sink.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
