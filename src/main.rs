use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use travelsrv::{
    api::{self, AppState},
    cli::Args,
    clients::{CountriesClient, OpenTripMapClient},
    config::Config,
    query::{QueryClient, TravelQueries},
    services::{country::CountryService, place::PlaceService, preferences::PreferenceStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    args.apply(&mut config);

    if !config.has_opentripmap_key() {
        warn!("OPENTRIPMAP_API_KEY is not set; points-of-interest requests will be rejected upstream");
    }

    let countries_client = CountriesClient::new(&config.countries_api_url, config.request_timeout)
        .context("Failed to build countries client")?;
    let opentripmap_client = OpenTripMapClient::new(
        &config.opentripmap_api_url,
        config.request_timeout,
        &config.opentripmap_api_key,
    )
    .context("Failed to build OpenTripMap client")?;

    let preferences = if args.should_persist_preferences() {
        PreferenceStore::open(&config.preferences_db_path())
            .context("Failed to open preference store")?
    } else {
        info!("Keeping preferences in memory");
        PreferenceStore::in_memory().context("Failed to create preference store")?
    };

    let queries = TravelQueries::new(
        QueryClient::new(config.query_client_config()),
        Arc::new(CountryService::new(countries_client)),
        Arc::new(PlaceService::new(opentripmap_client)),
    );

    if args.should_warm_cache() {
        warm_cache(&queries).await;
    }

    let app = api::router(AppState {
        queries,
        preferences,
    });

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.server_port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.server_port))?;

    info!("Server listening on http://0.0.0.0:{}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn warm_cache(queries: &TravelQueries) {
    info!("Warming popular queries");
    let (destinations, places) = tokio::join!(queries.popular_destinations(), queries.popular_places());

    if let Some(e) = destinations.error().or(places.error()) {
        warn!("Cache warm-up incomplete: {}", e);
    } else {
        info!("Cache warm-up finished");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
