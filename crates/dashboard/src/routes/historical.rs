use axum::{extract::State, Json};
use std::sync::Arc;
use time::OffsetDateTime;

use crate::{
    historical::{historical_observations, Error, HistoricalResponse},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/historical",
    responses(
        (status = OK, description = "One reading per day for the last few days", body = HistoricalResponse),
        (status = NOT_FOUND, description = "No usable data came back from the station", body = crate::historical::ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Missing configuration or unexpected failure", body = crate::historical::ErrorBody)
    ))]
pub async fn get_historical(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoricalResponse>, Error> {
    let response = historical_observations(
        state.source.as_ref(),
        &state.station,
        OffsetDateTime::now_utc(),
        state.history_days,
    )
    .await?;
    Ok(Json(response))
}
