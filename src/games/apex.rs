use super::{Metric, MetricKind, Platform};

/// Apex Legends profile path segment on the TRN API.
pub const PROVIDER_SLUG: &str = "apex";

pub const PLATFORMS: &[Platform] = &[
    Platform::new("origin", "Origin (PC)"),
    Platform::new("psn", "PlayStation"),
    Platform::new("xbl", "Xbox"),
];

pub const METRICS: &[Metric] = &[
    Metric::new("level", "Level", MetricKind::Descriptive),
    Metric::new("kills", "Kills", MetricKind::Count),
    Metric::new("damage", "Damage", MetricKind::Count),
    Metric::new("wins", "Wins", MetricKind::Count),
    Metric::new("kd", "K/D", MetricKind::Ratio),
];
