//! PNG bar-chart rendering for a [`ChartModel`].

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::{loader::ChartError, model::ChartModel};

const FALLBACK_BAR_COLOR: RGBAColor = RGBAColor(75, 192, 192, 0.6);

#[derive(Debug, Clone, Copy)]
pub struct BarChartRenderer {
    width: u32,
    height: u32,
}

impl Default for BarChartRenderer {
    fn default() -> Self {
        Self::new(1200, 600)
    }
}

impl BarChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Draw the first dataset as vertical bars, one per label, with the
    /// legend on top. An empty model produces an empty frame.
    pub async fn render_png(&self, model: &ChartModel, output_path: &Path) -> Result<(), ChartError> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }

        let model = model.clone();
        let path = output_path.to_path_buf();
        let size = (self.width, self.height);

        tokio::task::spawn_blocking(move || draw_bar_chart(&model, &path, size))
            .await
            .map_err(|e| ChartError::Render(format!("render task failed: {}", e)))?
            .map_err(|e| ChartError::Render(format!("{:#}", e)))?;

        info!(output = %output_path.display(), "Bar chart written");
        Ok(())
    }
}

fn draw_bar_chart(model: &ChartModel, path: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let dataset = model.datasets.first();
    let values: Vec<f64> = dataset
        .map(|d| d.data.iter().map(|n| n.as_f64().unwrap_or(0.0)).collect())
        .unwrap_or_default();
    let color = dataset
        .and_then(|d| parse_css_color(&d.background_color))
        .unwrap_or(FALLBACK_BAR_COLOR);

    let slots = model.labels.len().max(values.len()).max(1);
    let (y_min, y_max) = value_range(&values);
    // An empty model is drawn as a bare frame with no text.
    let (x_label_count, y_label_count) = if model.is_empty() { (0, 0) } else { (slots, 10) };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => model.labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    if let Some(dataset) = dataset.filter(|_| !model.is_empty()) {
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(color.filled())
                    .margin(8)
                    .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
            )?
            .label(dataset.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperMiddle)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.4))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Y axis bounds with headroom; always includes zero.
fn value_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    (min * 1.1, top)
}

/// Parse `rgba(r, g, b, a)`, `rgb(r, g, b)` or `#rrggbb`.
fn parse_css_color(value: &str) -> Option<RGBAColor> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(RGBAColor(channel(0)?, channel(2)?, channel(4)?, 1.0));
    }

    let (inner, has_alpha) = if let Some(rest) = value.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = value.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != if has_alpha { 4 } else { 3 } {
        return None;
    }

    let r = parts[0].parse().ok()?;
    let g = parts[1].parse().ok()?;
    let b = parts[2].parse().ok()?;
    let a = if has_alpha {
        parts[3].parse::<f64>().ok()?.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(RGBAColor(r, g, b, a))
}
