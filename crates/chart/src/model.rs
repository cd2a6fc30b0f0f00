use serde::{Deserialize, Serialize};
use serde_json::Number;
use ts_rs::TS;

pub const ELAPSED_TIME_LABEL: &str = "Elapsed Time";
pub const ELAPSED_TIME_COLOR: &str = "rgba(75, 192, 192, 0.6)";

/// The part of a served record the chart reads. `activity` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    #[ts(type = "number")]
    pub elapsed_time: Number,
}

/// Labels plus datasets, in the shape bar-chart renderers expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    #[ts(type = "Array<number>")]
    pub data: Vec<Number>,
    pub background_color: String,
}

impl ChartModel {
    /// `labels[i]` is the date of `points[i]` and the single dataset's
    /// `data[i]` is its elapsed time. Nothing is sorted, merged or dropped,
    /// so repeated dates stay repeated.
    pub fn from_points(points: &[ChartPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| p.date.clone()).collect(),
            datasets: vec![ChartDataset {
                label: ELAPSED_TIME_LABEL.to_string(),
                data: points.iter().map(|p| p.elapsed_time.clone()).collect(),
                background_color: ELAPSED_TIME_COLOR.to_string(),
            }],
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.datasets.iter().all(|d| d.data.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct LegendOptions {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct ChartPlugins {
    pub legend: LegendOptions,
}

/// Display options: responsive layout, legend on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            plugins: ChartPlugins::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
}

/// Everything a renderer needs: chart type, data and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartModel,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn bar(data: ChartModel) -> Self {
        Self {
            chart_type: ChartType::Bar,
            data,
            options: ChartOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn point(date: &str, elapsed: u64) -> ChartPoint {
        ChartPoint {
            date: date.to_string(),
            elapsed_time: Number::from(elapsed),
        }
    }

    #[test]
    fn test_projection_keeps_index_correspondence() {
        let model = ChartModel::from_points(&[point("2024-01-01", 30), point("2024-01-02", 45)]);

        assert_eq!(model.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(model.datasets.len(), 1);
        assert_eq!(model.datasets[0].label, "Elapsed Time");
        assert_eq!(model.datasets[0].background_color, "rgba(75, 192, 192, 0.6)");
        assert_eq!(
            serde_json::to_value(&model.datasets[0].data).unwrap(),
            json!([30, 45])
        );
    }

    #[test]
    fn test_repeated_dates_are_not_merged() {
        let model = ChartModel::from_points(&[
            point("2024-01-02", 10),
            point("2024-01-01", 20),
            point("2024-01-02", 5),
        ]);

        assert_eq!(model.labels, vec!["2024-01-02", "2024-01-01", "2024-01-02"]);
        assert_eq!(
            serde_json::to_value(&model.datasets[0].data).unwrap(),
            json!([10, 20, 5])
        );
    }

    #[test]
    fn test_default_model_is_empty() {
        let model = ChartModel::default();
        assert!(model.is_empty());
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "labels": [], "datasets": [] })
        );
        assert!(ChartModel::from_points(&[]).is_empty());
    }

    #[test]
    fn test_points_ignore_activity() {
        let points: Vec<ChartPoint> = serde_json::from_value(json!([
            { "date": "2024-01-01", "activity": "Run", "elapsedTime": 30 }
        ]))
        .unwrap();
        assert_eq!(points, vec![point("2024-01-01", 30)]);
    }

    #[test]
    fn test_config_serializes_like_a_bar_chart() {
        let config = ChartConfig::bar(ChartModel::from_points(&[point("2024-01-01", 30)]));

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "type": "bar",
                "data": {
                    "labels": ["2024-01-01"],
                    "datasets": [{
                        "label": "Elapsed Time",
                        "data": [30],
                        "backgroundColor": "rgba(75, 192, 192, 0.6)"
                    }]
                },
                "options": {
                    "responsive": true,
                    "plugins": { "legend": { "position": "top" } }
                }
            })
        );
    }
}
