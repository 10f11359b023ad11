//! Route definitions for enforcement officers, mounted at `/enforcement/v1`.

use axum::routing::post;
use axum::Router;

use crate::handlers::check_parking;
use crate::state::AppState;

/// ```text
/// POST /check_parking/ -> check_parking
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/check_parking/", post(check_parking::check_parking))
}
