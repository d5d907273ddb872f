use std::net::SocketAddr;

use crate::command::Command;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: console commands executed. Labels: command, status.
pub const COMMANDS_TOTAL: &str = "roomplan_commands_total";

/// Counter: booking attempts. Labels: status (committed, rejected).
pub const BOOKINGS_TOTAL: &str = "roomplan_bookings_total";

/// Histogram: assignment search latency in seconds. Labels: phase.
pub const SEARCH_DURATION_SECONDS: &str = "roomplan_search_duration_seconds";

/// Counter: subsets evaluated by the cross-floor fallback.
pub const FALLBACK_SUBSETS_TOTAL: &str = "roomplan_fallback_subsets_total";

// ── USE metrics (inventory utilization) ─────────────────────────

/// Gauge: rooms currently available.
pub const ROOMS_AVAILABLE: &str = "roomplan_rooms_available";

/// Counter: inventory resets.
pub const RESETS_TOTAL: &str = "roomplan_resets_total";

/// Counter: rooms marked occupied by random occupancy.
pub const ROOMS_OCCUPIED_TOTAL: &str = "roomplan_rooms_occupied_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::Book { .. } => "book",
        Command::BookRooms { .. } => "book_rooms",
        Command::Preview { .. } => "preview",
        Command::Reset => "reset",
        Command::Random => "random",
        Command::Stats => "stats",
        Command::Rooms { .. } => "rooms",
        Command::Free => "free",
        Command::Bookings => "bookings",
        Command::Last => "last",
        Command::Watch { .. } => "watch",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}
