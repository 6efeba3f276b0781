use kinemeter_api::{ExplorationBudget, GridPos, SpatialLookup};
use kinemeter_core::format::{format_compact, format_percent, format_rpm, summarize};
use kinemeter_core::{BlockGrid, NetworkExplorer, NodeClassifier};
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> MetricRow {
    MetricRow {
        metric,
        value: value.to_string(),
    }
}

pub fn run(
    world: &Path,
    origin: GridPos,
    max_nodes: Option<u32>,
    json: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::load_config(config)?;
    let grid = BlockGrid::load(world)?;

    let Some(node) = grid.node_at(origin) else {
        println!("No kinetic block at {}", origin);
        return Ok(());
    };

    let budget = max_nodes
        .map(ExplorationBudget::new)
        .unwrap_or_else(|| config.budget());
    let explorer = NetworkExplorer::new(NodeClassifier::new(config.classification.clone()));

    info!("Exploring from {} ({}) with budget {}", origin, node.block_id, budget.max_nodes);
    let (snapshot, stats) = explorer.explore_with_stats(&node, budget, &grid);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let mut rows = vec![row("Origin", format!("{} @ {}", node.block_id, origin))];
    if config.show_rpm {
        rows.push(row("RPM", format_rpm(node.speed)));
    }
    rows.extend([
        row("Nodes", snapshot.node_count),
        row("Load", format_compact(snapshot.load_total)),
        row("Capacity", format_compact(snapshot.capacity_total)),
        row("Usage", format_percent(snapshot.ratio())),
        row("Headroom", format_compact(snapshot.headroom())),
        row("Lookups", stats.lookups),
        row("Truncated", stats.truncated),
    ]);
    println!("{}", Table::new(rows));
    println!("{}", summarize(&snapshot));

    Ok(())
}
