use serde::{Deserialize, Serialize};

/// Aggregate statistics reported with every update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// The number of completed trips.
    pub trips: u64,
    /// The share of blocked vehicles, in percent.
    #[serde(rename = "congestion")]
    pub congestion_pct: f64,
    /// The average traffic light cycle, in seconds.
    #[serde(rename = "avg_cycle")]
    pub avg_cycle_sec: f64,
}

/// Statistics formatted for display.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsDisplay {
    pub trips: String,
    pub congestion: String,
    /// Whether congestion is above the warning threshold.
    pub congested: bool,
    pub cycle: String,
}

impl StatsDisplay {
    pub fn from_stats(stats: &Stats, warn_pct: f64) -> Self {
        Self {
            trips: stats.trips.to_string(),
            congestion: format!("{:.1}%", stats.congestion_pct),
            congested: stats.congestion_pct > warn_pct,
            cycle: format!("{:.1}s", stats.avg_cycle_sec),
        }
    }
}
