use super::{Metric, MetricKind, Platform};

/// Fortnite profile path segment on the TRN API.
pub const PROVIDER_SLUG: &str = "fortnite";

pub const DEFAULT_PLATFORM: &str = "epic";

pub const PLATFORMS: &[Platform] = &[
    Platform::new("epic", "Epic Games"),
    Platform::new("psn", "PlayStation"),
    Platform::new("xbl", "Xbox"),
];

pub const METRICS: &[Metric] = &[
    Metric::new("wins", "Wins", MetricKind::Count),
    Metric::new("kd", "K/D Ratio", MetricKind::Ratio),
    Metric::new("kills", "Kills", MetricKind::Count),
    Metric::new("winRate", "Win Rate", MetricKind::Percentage),
    Metric::new("matches", "Matches Played", MetricKind::Count),
    Metric::new("top10", "Top 10", MetricKind::Count),
    Metric::new("top5", "Top 5", MetricKind::Count),
    Metric::new("top3", "Top 3", MetricKind::Count),
    Metric::new("killsPerMatch", "Kills/Match", MetricKind::Ratio),
    Metric::new("minutesPlayed", "Minutes Played", MetricKind::Count),
];
