use anyhow::{Context, Result};
use clap::Parser;
use sheetbanner_model::{CellValue, PipelineConfig, Record, RecordNode};
use std::path::PathBuf;

/// Runs the layout inference pipeline against one sheet of an
/// `.xlsx`/`.xlsm` workbook and prints the detected tables as JSON.
#[derive(Parser)]
#[command(name = "sheetbanner", version, about)]
struct Cli {
    /// Path to the workbook to read.
    path: PathBuf,

    /// Sheet to process; defaults to the workbook's first sheet.
    #[arg(long)]
    sheet: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Minimum detected table width, in columns.
    #[arg(long, default_value_t = PipelineConfig::default().min_width)]
    min_width: u32,

    /// Minimum detected table height, in rows.
    #[arg(long, default_value_t = PipelineConfig::default().min_height)]
    min_height: u32,

    /// Fraction of ruled columns required for a header/body boundary.
    #[arg(long, default_value_t = PipelineConfig::default().border_threshold)]
    border_threshold: f64,
}

impl From<ConfigArgs> for PipelineConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            min_width: args.min_width,
            min_height: args.min_height,
            border_threshold: args.border_threshold,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut workbook = sheetbanner_xlsx::XlsxWorkbook::open(&cli.path)
        .with_context(|| format!("failed to open {}", cli.path.display()))?;

    let sheet_name = match cli.sheet {
        Some(name) => name,
        None => workbook
            .sheet_names()
            .first()
            .map(|s| s.to_string())
            .context("workbook has no sheets")?,
    };

    let sheet = workbook
        .sheet(&sheet_name)
        .with_context(|| format!("failed to read sheet {sheet_name:?}"))?;

    let output = sheetbanner_engine::run(&sheet, cli.config.into());
    for diagnostic in &output.diagnostics {
        log::warn!("{diagnostic}");
    }

    let tables: Vec<serde_json::Value> = output
        .tables
        .iter()
        .map(|table| {
            serde_json::json!({
                "table_box": {
                    "min_row": table.table_box.min_row,
                    "max_row": table.table_box.max_row,
                    "min_col": table.table_box.min_col,
                    "max_col": table.table_box.max_col,
                },
                "records": table.records.iter().map(record_to_json).collect::<Vec<_>>(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&tables)?);
    Ok(())
}

/// Converts a [`Record`] into a JSON object. `RecordNode::Map` recurses;
/// [`CellValue`] has no serde impl of its own (the core crates stay
/// serialization-format agnostic), so the leaf conversion lives here
/// instead.
fn record_to_json(record: &Record) -> serde_json::Value {
    let map = record
        .iter()
        .map(|(key, node)| (key.clone(), node_to_json(node)))
        .collect();
    serde_json::Value::Object(map)
}

fn node_to_json(node: &RecordNode) -> serde_json::Value {
    match node {
        RecordNode::Leaf(value) => cell_value_to_json(value),
        RecordNode::Map(map) => record_to_json(map),
    }
}

fn cell_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Int(v) => serde_json::Value::from(*v),
        CellValue::Float(v) => serde_json::Number::from_f64(v.0)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        CellValue::Bool(v) => serde_json::Value::Bool(*v),
        CellValue::Text(v) => serde_json::Value::String(v.clone()),
        CellValue::Date(v) => serde_json::Value::String(v.format("%Y-%m-%dT%H:%M:%S").to_string()),
    }
}
