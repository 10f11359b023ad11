//! Route definitions for parking operators, mounted at `/operator/v1`.

use axum::routing::post;
use axum::Router;

use crate::handlers::operator_parking;
use crate::state::AppState;

/// ```text
/// POST /parking/ -> register_parking
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/parking/", post(operator_parking::register_parking))
}
