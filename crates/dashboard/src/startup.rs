use crate::{
    historical, observations, routes, station, tempest::ObservationSource, Cli, StationConfig,
    TempestClient,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub station: StationConfig,
    pub history_days: u32,
    pub source: Arc<dyn ObservationSource>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::historical::get_historical,
        routes::station::get_station,
    ),
    components(
        schemas(
            observations::WeatherObservation,
            historical::HistoricalResponse,
            historical::Summary,
            historical::ErrorBody,
            station::StationInfo,
        )
    ),
    tags(
        (name = "weather dashboard api", description = "daily history and station details for a Tempest weather station")
    )
)]
struct ApiDoc;

pub fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let client = TempestClient::new(cli.api_url(), cli.request_timeout())
        .map_err(|e| anyhow!("error setting up tempest client: {}", e))?;

    Ok(AppState {
        static_dir: cli.static_dir(),
        station: cli.station(),
        history_days: cli.history_days(),
        source: Arc::new(client),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let serve_static = ServeDir::new(&app_state.static_dir);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/api/historical", get(routes::get_historical))
        .route("/api/station", get(routes::get_station))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .fallback_service(serve_static)
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
