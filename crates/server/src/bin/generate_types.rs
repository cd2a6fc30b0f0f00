use std::{fs, path::PathBuf};

use anyhow::Context;
use chart::model::{
    ChartConfig, ChartDataset, ChartModel, ChartOptions, ChartPlugins, ChartPoint, ChartType,
    LegendOptions, LegendPosition,
};
use services::services::records::NormalizedRecord;
use ts_rs::TS;

const DEFAULT_OUTPUT: &str = "shared/types.ts";

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let decls = [
        NormalizedRecord::decl(),
        ChartPoint::decl(),
        ChartDataset::decl(),
        ChartModel::decl(),
        LegendPosition::decl(),
        LegendOptions::decl(),
        ChartPlugins::decl(),
        ChartOptions::decl(),
        ChartType::decl(),
        ChartConfig::decl(),
    ];

    let mut content = String::from(
        "// This file was generated by `cargo run --bin generate-types`. Do not edit.\n\n",
    );
    for decl in decls {
        content.push_str("export ");
        content.push_str(&decl);
        content.push_str("\n\n");
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&output, content.trim_end().to_string() + "\n")
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}
