//! Text helpers for whatever renders a [`NetworkSnapshot`].

use kinemeter_api::NetworkSnapshot;

/// `1234.0` -> `1.2K`, `2_500_000.0` -> `2.5M`; values below a thousand print as integers.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// A ratio as a whole percentage, rounding halves away from zero.
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

/// Absolute RPM with one decimal and a rotation arrow: clockwise for positive, counter-clockwise for
/// negative.
pub fn format_rpm(rpm: f32) -> String {
    let direction = if rpm < 0.0 { '⟲' } else { '⟳' };
    format!("{:.1} RPM {}", rpm.abs(), direction)
}

pub fn summarize(snapshot: &NetworkSnapshot) -> String {
    if snapshot.is_empty() {
        return "no network".to_string();
    }

    let marker = if snapshot.approximate { "~" } else { "" };
    let nodes = if snapshot.node_count == 1 { "node" } else { "nodes" };
    let mut line = format!(
        "{marker}{} / {} su ({}) across {} {nodes}",
        format_compact(snapshot.load_total),
        format_compact(snapshot.capacity_total),
        format_percent(snapshot.ratio()),
        snapshot.node_count,
    );
    if snapshot.is_overloaded() {
        line.push_str(" OVERLOADED");
    }
    line
}
