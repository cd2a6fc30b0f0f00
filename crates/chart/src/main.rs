use std::path::PathBuf;

use anyhow::Context;
use chart::{
    loader::{ChartLoader, DEFAULT_ENDPOINT},
    model::ChartConfig,
    render::BarChartRenderer,
};
use clap::Parser;
use tracing::{info, warn};
use url::Url;
use utils::log::init_tracing;

/// Render the Airtable time log as a bar chart PNG.
#[derive(Debug, Parser)]
#[command(name = "airtable-chart", version)]
struct Args {
    /// Record endpoint served by the server binary
    #[arg(long, env = "CHART_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Where to write the PNG
    #[arg(short, long, env = "CHART_OUTPUT", default_value = "airtable-chart.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Also print the chart config as JSON on stdout
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("chart=info,airtable_chart=info");

    let args = Args::parse();

    let loader = ChartLoader::new(args.endpoint).context("failed to build HTTP client")?;
    let model = loader.load_and_project().await;
    if model.is_empty() {
        warn!(endpoint = %loader.endpoint(), "No records loaded, rendering an empty chart");
    }

    if args.print_config {
        let config = ChartConfig::bar(model.clone());
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    BarChartRenderer::new(args.width, args.height)
        .render_png(&model, &args.output)
        .await
        .with_context(|| format!("failed to render {}", args.output.display()))?;

    info!(bars = model.labels.len(), "Done");
    Ok(())
}
