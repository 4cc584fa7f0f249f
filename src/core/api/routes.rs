//! Route drawing and optimization.
//!
//! The optimizer is a remote black box: the client sends the points the
//! user placed and draws whatever polyline comes back.

use serde::Serialize;

use crate::core::error::ApiError;
use crate::core::gateway::{ApiGateway, Navigator, Transport};
use crate::core::models::{Coordinate, OptimizedRoute};

pub const OPTIMIZE_PATH: &str = "/routes/optimize/";

#[derive(Debug, Serialize)]
struct OptimizeRequest<'a> {
    coordinates: &'a [Coordinate],
}

pub async fn optimize<T: Transport, N: Navigator>(
    gateway: &ApiGateway<T, N>,
    waypoints: &[Coordinate],
) -> Result<OptimizedRoute, ApiError> {
    if waypoints.len() < 2 {
        return Err(ApiError::InvalidRequest(
            "a route needs at least two points".to_string(),
        ));
    }
    gateway
        .post_json(
            OPTIMIZE_PATH,
            &OptimizeRequest {
                coordinates: waypoints,
            },
        )
        .await
}
