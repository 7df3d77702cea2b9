pub mod health;
pub mod sja;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /sja/{id}/pdf                                    generate SJA report (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/sja", sja::router())
}
