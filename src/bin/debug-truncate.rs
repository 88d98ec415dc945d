/// Diagnostic tool to verify report → truncation → tree pipeline
use report_treemap::layout::{AvailableSpace, RowAreaTruncator, MIN_NODE_AREA};
use report_treemap::{Generator, ReportInput};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("report_treemap=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: debug-truncate <REPORT.json> [WIDTH] [HEIGHT] [METRIC]"))?;
    let width = args.next().and_then(|w| w.parse::<f64>().ok());
    let height = args.next().and_then(|h| h.parse::<f64>().ok());
    let metric = args.next().unwrap_or_else(|| "nb_visits".to_string());

    println!("=== DIAGNOSTIC: Report → Truncation → Tree ===");
    println!("Report: {}", path.display());

    // Load
    let input = ReportInput::load(&path)?;
    let current = input.current();
    println!(
        "\n[1] Loaded: {} current rows, past period: {}",
        current.len(),
        input.past().map(|p| p.len().to_string()).unwrap_or_else(|| "none".to_string())
    );

    // Proportional areas
    let space = width.zip(height).and_then(|(w, h)| AvailableSpace::new(w, h));
    let values = current.metric_values(&metric);
    let sum: f64 = values.iter().sum();
    match space {
        Some(space) if sum != 0.0 => {
            println!(
                "\n[2] Proportional areas in {:.0}x{:.0} ({:.0}px², metric sum {}):",
                space.width,
                space.height,
                space.area(),
                sum
            );
            for (i, (row, value)) in current.rows.iter().zip(&values).enumerate() {
                let area = space.area() * value / sum;
                println!(
                    "    [{}] '{}' - {} → {:.1}px²{}",
                    i,
                    row.label,
                    value,
                    area,
                    if area < MIN_NODE_AREA { " (below minimum)" } else { "" }
                );
            }
        }
        Some(_) => println!("\n[2] Metric '{}' sums to zero, default cap applies", metric),
        None => println!("\n[2] No usable dimensions, default cap applies"),
    }

    // Decision
    let truncator = RowAreaTruncator::new(&metric, space);
    let keep_through = truncator.keep_through_index(current);
    println!("\n[3] Keep through row index {}", keep_through);

    // Tree
    let mut generator = Generator::new(&metric, &metric);
    generator.set_available_dimensions(width, height)?;
    if input.past().is_some() {
        generator.enable_evolution()?;
    }
    let input = generator.truncate_input(input);
    let root = generator.generate(input)?;

    println!("\n[4] Tree: {} child nodes", root.children.len());
    for child in &root.children {
        println!(
            "    {} '{}' area={} evolution={:?} aggregate_offset={:?}",
            child.id,
            child.name,
            child.data.area.unwrap_or(0.0),
            child.data.evolution,
            child.data.aggregate_offset
        );
    }

    Ok(())
}
