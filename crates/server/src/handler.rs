//! Request handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geo_nearby::{NearbyResponse, NearbyService, ValidationError};
use tracing::debug;

/// Raw `/nearby` query parameters. Missing values are empty strings and
/// fail validation like any other malformed number.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NearbyParams {
    pub lat: String,
    pub lon: String,
}

impl NearbyParams {
    /// Pick `lat` and `lon` out of decoded query pairs. A repeated key
    /// keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut lat = None;
        let mut lon = None;
        for (key, value) in pairs {
            match key.as_str() {
                "lat" if lat.is_none() => lat = Some(value),
                "lon" if lon.is_none() => lon = Some(value),
                _ => {}
            }
        }
        Self {
            lat: lat.unwrap_or_default(),
            lon: lon.unwrap_or_default(),
        }
    }
}

/// Rejected request, rendered as `400` with the message as plain text.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] ValidationError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
    }
}

pub async fn nearby(
    State(service): State<NearbyService>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let params = NearbyParams::from_pairs(pairs);
    let response = service
        .handle_nearby(&params.lat, &params.lon)
        .inspect_err(|e| {
            debug!("Rejected nearby query lat={:?} lon={:?}: {}", params.lat, params.lon, e)
        })?;
    debug!(
        "Nearby lat={} lon={} -> {} results",
        params.lat,
        params.lon,
        response.hotel_ids.len()
    );
    Ok(Json(response))
}
