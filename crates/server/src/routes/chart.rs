//! Routes for the chart page and the projected chart config it renders.

use axum::{
    Router,
    extract::State,
    response::{Html, Json as ResponseJson},
    routing::get,
};
use chart::model::{ChartConfig, ChartModel, ChartPoint};
use services::services::records::NormalizedRecord;

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/chart
/// Bar chart config for the current records. A failed fetch yields the
/// empty model rather than an error.
pub async fn get_chart(State(state): State<AppState>) -> ResponseJson<ChartConfig> {
    let model = match state.records().fetch_records().await {
        Ok(records) => {
            let points: Vec<ChartPoint> = records.into_iter().map(to_point).collect();
            ChartModel::from_points(&points)
        }
        Err(_) => ChartModel::default(),
    };

    ResponseJson(ChartConfig::bar(model))
}

fn to_point(record: NormalizedRecord) -> ChartPoint {
    ChartPoint {
        date: record.date,
        elapsed_time: record.elapsed_time,
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/chart", get(get_chart))
}
