use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod airtable_data;
pub mod chart;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(airtable_data::router())
        .merge(chart::router());

    Router::new()
        .route("/", get(chart::index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
