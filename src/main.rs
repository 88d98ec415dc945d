use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use report_treemap::{ReportInput, TreemapConfig, TreemapRequest};

/// Convert a sorted analytics report into treemap JSON.
#[derive(Parser, Debug)]
#[command(name = "report-treemap", version, about)]
struct Cli {
    /// Report JSON: a table object, or an array of [past, current] tables
    input: PathBuf,

    /// Metric column(s) to graph; only the first of a comma list is used
    #[arg(long, default_value = "nb_visits")]
    column: String,

    /// Display name of the metric in tooltips
    #[arg(long)]
    translation: Option<String>,

    /// Available width in pixels
    #[arg(long, env = "TREEMAP_AVAILABLE_WIDTH")]
    width: Option<String>,

    /// Available height in pixels
    #[arg(long, env = "TREEMAP_AVAILABLE_HEIGHT")]
    height: Option<String>,

    /// Absolute offset of the first row
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// Sub-table id used to namespace node ids
    #[arg(long)]
    table_id: Option<String>,

    #[arg(long, default_value = "")]
    root_name: String,

    /// Annotate nodes with evolution against the past period
    #[arg(long)]
    evolution: bool,

    #[arg(long, default_value = "day")]
    period: String,

    /// Report method, e.g. Actions.getPageUrls (selects label formatting)
    #[arg(long, default_value = "")]
    api_method: String,

    /// Visualization config JSON (columns, translations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the tree
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("report_treemap=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TreemapConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TreemapConfig::default(),
    };
    let input = ReportInput::load(&cli.input)
        .with_context(|| format!("loading report {}", cli.input.display()))?;
    if !input.has_data() {
        tracing::warn!("Current period of {} has no rows", cli.input.display());
    }

    let request = TreemapRequest {
        api_method: cli.api_method,
        column: cli.column,
        period: cli.period,
        available_width: cli.width.map(serde_json::Value::String),
        available_height: cli.height.map(serde_json::Value::String),
        show_evolution_values: cli.evolution,
        filter_offset: cli.offset,
        id_subtable: cli.table_id,
        root_name: cli.root_name,
    };
    if let Some(translation) = &cli.translation {
        request.override_translation(&mut config, translation);
    }

    let root = request.generate(&config, input)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&root)?
    } else {
        serde_json::to_string(&root)?
    };
    println!("{}", json);

    Ok(())
}
