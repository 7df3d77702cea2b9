use axum::routing::post;
use axum::Router;

use crate::handlers::sja_report;
use crate::state::AppState;

/// Routes mounted at `/api/v1/sja`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/pdf", post(sja_report::generate_pdf))
}
