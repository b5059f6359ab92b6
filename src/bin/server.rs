use axum::{
    routing::{get, post},
    Extension, Router,
};
use pawtrace_server::config::Config;
use pawtrace_server::views::Views;
use pawtrace_server::{api, migrator};
use sea_orm::{Database, DatabaseConnection};

#[tokio::main]
async fn main() {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    pawtrace_server::telemetry::init_telemetry("pawtrace-server");

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let config = Config::from_env().expect("Invalid LISTEN_ADDR");

    // Database Connection
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    use sea_orm_migration::MigratorTrait;
    migrator::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // Photos land here; must exist before the first submission.
    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    // Initialize Metrics
    pawtrace_server::metrics::init_metrics(&db).await;

    let addr = config.listen_addr;
    let views = Views::build();
    let app = app(db, config, views, prometheus_layer, metric_handle);

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn app(
    db: DatabaseConnection,
    config: Config,
    views: Views,
    prometheus_layer: axum_prometheus::PrometheusMetricLayer<'static>,
    metric_handle: metrics_exporter_prometheus::PrometheusHandle,
) -> Router {
    let upload_dir = config.upload_dir.clone();
    let max_body = config.max_upload_bytes;

    Router::new()
        .route("/", get(api::listing::index))
        .route("/ping", get(api::listing::ping))
        .route(
            "/report/lost",
            get(api::reports::lost_form).post(api::reports::submit_lost),
        )
        .route(
            "/report/found",
            get(api::reports::found_form).post(api::reports::submit_found),
        )
        .route("/report/:id/found", post(api::reports::mark_found))
        .route(
            "/wechat",
            get(api::wechat::verify_url).post(api::wechat::receive_message),
        )
        // Uploaded photos are served straight off disk.
        .nest_service(
            "/static/uploads",
            tower_http::services::ServeDir::new(upload_dir),
        )
        .layer(Extension(db))
        .layer(Extension(config))
        .layer(Extension(views))
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // Dynamic Span Name: "METHOD /path" (e.g., "POST /report/lost")
                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    let user_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .and_then(|v| v.to_str().ok())
                        .or_else(|| {
                            request
                                .headers()
                                .get("x-real-ip")
                                .and_then(|v| v.to_str().ok())
                        })
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        user_ip = user_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in on completion.
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                    // Quiet: one "request completed" line per request is enough.
                })
                .on_response(|response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                    span.record("status", tracing::field::display(response.status()));
                    span.record("latency", tracing::field::debug(latency));
                    tracing::info!("request completed");
                }),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(axum::extract::DefaultBodyLimit::max(max_body))
}
