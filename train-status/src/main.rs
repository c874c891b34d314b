use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use train_status::cache::CachedFeedClient;
use train_status::config::AppConfig;
use train_status::estimator::Estimator;
use train_status::feed::{FeedClient, FeedSource, MockFeed};
use train_status::stations::{StationDirectory, load_directory};
use train_status::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    // Before logging, so RUST_LOG may come from .env too
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Station names and coordinates
    let directory = match &config.stations_file {
        Some(path) => {
            let directory = load_directory(path).expect("Failed to load stations file");
            info!(path = %path.display(), stations = directory.len(), "loaded station directory");
            directory
        }
        None => {
            warn!("STATIONS_FILE not set; stations will be shown by id");
            StationDirectory::empty()
        }
    };

    // Stop history source
    let feed = match &config.mock_file {
        Some(path) => {
            let mock = MockFeed::from_file(path).expect("Failed to load mock feed");
            info!(path = %path.display(), rows = mock.len(), "using mock feed");
            FeedSource::Mock(mock)
        }
        None => {
            let client = FeedClient::new(config.feed.clone()).expect("Failed to create feed client");
            FeedSource::Live(Arc::new(CachedFeedClient::new(client, &config.cache)))
        }
    };

    let estimator = Estimator::new(config.trip.clone(), Arc::new(directory));
    info!(
        trip = %config.trip.trip_pattern,
        target = %config.trip.target_stop_id,
        source = feed.describe(),
        "tracking trip"
    );

    let state = AppState::new(feed, estimator, config.refresh_secs);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!("train status board listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
