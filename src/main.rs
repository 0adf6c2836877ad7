use axum::{handler::HandlerWithoutStateExt, routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dm_preview_server::config::Config;
use dm_preview_server::handlers;
use dm_preview_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "dm_preview_server=info,tower_http=info"
            .parse()
            .unwrap()
    });

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 DM Preview Server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!("📝 Configuration loaded");

    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        info!("🔒 CORS: restrictive (production mode)");
        CorsLayer::new()
    };

    let addr = config.server_addr();
    info!("📂 Public directory: {}", config.public_dir.display());
    info!("🔤 Font: {}", config.font_path.display());

    let app_state = AppState::from_config(&config).expect("Failed to build application state");

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    // Static assets (avatar, font) are served from the public directory; the
    // preview renderer fetches the avatar back through this same route.
    let assets =
        ServeDir::new(&config.public_dir).not_found_service(handlers::not_found.into_service());

    let app = Router::new()
        .route("/", get(handlers::page::home))
        .route("/og", get(handlers::og::preview_image))
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .fallback_service(assets)
        // Middleware
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
