use kinemeter_api::GridPos;
use kinemeter_core::format::{format_compact, format_percent, format_rpm};
use kinemeter_core::{BlockGrid, KineticProbe, PinnedOrigin, SampleOutcome};
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct TickRow {
    #[tabled(rename = "Tick")]
    tick: i64,
    #[tabled(rename = "Sample")]
    outcome: &'static str,
    #[tabled(rename = "RPM")]
    rpm: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Nodes")]
    nodes: String,
}

fn outcome_label(outcome: SampleOutcome) -> &'static str {
    match outcome {
        SampleOutcome::Cached => "cached",
        SampleOutcome::Fresh => "fresh",
        SampleOutcome::Idle => "idle",
    }
}

pub fn run(
    world: &Path,
    origin: GridPos,
    ticks: u32,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::load_config(config)?;
    let grid = BlockGrid::load(world)?;
    let show_rpm = config.show_rpm;
    let selector = PinnedOrigin::new(origin);
    let mut probe = KineticProbe::new(config);

    let mut fresh = 0usize;
    let mut rows = Vec::with_capacity(ticks as usize);
    for tick in 0..i64::from(ticks) {
        let reading = probe.poll(tick, &grid, &selector);
        if reading.outcome == SampleOutcome::Fresh {
            fresh += 1;
        }

        let dash = || "-".to_string();
        rows.push(TickRow {
            tick,
            outcome: outcome_label(reading.outcome),
            rpm: reading
                .speed
                .filter(|_| show_rpm)
                .map(format_rpm)
                .unwrap_or_else(dash),
            load: reading
                .snapshot
                .map(|s| format_compact(s.load_total))
                .unwrap_or_else(dash),
            capacity: reading
                .snapshot
                .map(|s| format_compact(s.capacity_total))
                .unwrap_or_else(dash),
            usage: reading
                .snapshot
                .map(|s| format_percent(s.ratio()))
                .unwrap_or_else(dash),
            nodes: reading
                .snapshot
                .map(|s| s.node_count.to_string())
                .unwrap_or_else(dash),
        });
    }

    info!("Replayed {} ticks, {} explorations", ticks, fresh);
    if rows.is_empty() {
        println!("Nothing to replay.");
    } else {
        println!("{}", Table::new(rows));
    }
    println!("{} of {} ticks ran an exploration", fresh, ticks);

    Ok(())
}
