use super::{Metric, MetricKind, Platform};

/// TRN tracks Call of Duty stats under its Warzone profile routes.
pub const PROVIDER_SLUG: &str = "warzone";

pub const PLATFORMS: &[Platform] = &[
    Platform::new("battle", "Battle.net"),
    Platform::new("psn", "PlayStation"),
    Platform::new("xbl", "Xbox"),
];

pub const METRICS: &[Metric] = &[
    Metric::new("wins", "Wins", MetricKind::Count),
    Metric::new("kdRatio", "K/D", MetricKind::Ratio),
    Metric::new("kills", "Kills", MetricKind::Count),
    Metric::new("wlPercentage", "Win Rate", MetricKind::Percentage),
];
