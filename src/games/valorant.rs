use super::{Metric, MetricKind};

/// Valorant profile path segment on the TRN API.
pub const PROVIDER_SLUG: &str = "valorant";

/// Valorant profiles are always looked up by Riot ID.
pub const PLATFORM: &str = "riot";

pub const METRICS: &[Metric] = &[
    Metric::new("peakRank", "Rank", MetricKind::Rank),
    Metric::new("matchesWon", "Wins", MetricKind::Count),
    Metric::new("matchesWinPct", "Win Rate", MetricKind::Percentage),
    Metric::new("kDRatio", "K/D", MetricKind::Ratio),
    Metric::new("headshotsPercentage", "Headshot %", MetricKind::Percentage),
];
