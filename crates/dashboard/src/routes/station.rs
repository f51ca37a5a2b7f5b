use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{station::StationInfo, AppState};

#[utoipa::path(
    get,
    path = "/api/station",
    responses(
        (status = OK, description = "Station name and map coordinates", body = StationInfo)
    ))]
pub async fn get_station(State(state): State<Arc<AppState>>) -> Json<StationInfo> {
    Json(state.station.info())
}
