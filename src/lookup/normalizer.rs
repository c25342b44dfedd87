use std::collections::BTreeMap;

use serde_json::Value;

use crate::games::{Game, Metric};

/// `type` of the segment holding lifetime aggregates.
pub const OVERVIEW_SEGMENT: &str = "overview";

/// Flat per-game view of a profile, one display string per metric.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatView {
    pub game: Game,
    /// `platformInfo.platformUserIdentifier`, when the provider sent one.
    pub player: Option<String>,
    pub stats: BTreeMap<&'static str, String>,
}

impl StatView {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.get(key).map(String::as_str)
    }

    /// Metrics in display order alongside their values.
    pub fn rows(&self) -> impl Iterator<Item = (&'static Metric, &str)> + '_ {
        self.game
            .metrics()
            .iter()
            .map(move |metric| (metric, self.get(metric.key).unwrap_or(metric.default_value())))
    }
}

/// `segments[type == segment_type].stats[key].displayValue`, if every step
/// resolves to something usable.
pub fn get_metric<'a>(profile: &'a Value, segment_type: &str, key: &str) -> Option<&'a str> {
    profile
        .get("segments")?
        .as_array()?
        .iter()
        .find(|segment| segment.get("type").and_then(Value::as_str) == Some(segment_type))?
        .get("stats")?
        .get(key)?
        .get("displayValue")?
        .as_str()
        .filter(|value| !value.is_empty())
}

pub fn normalize(profile: &Value, game: Game) -> StatView {
    let stats = game
        .metrics()
        .iter()
        .map(|metric| {
            let value = get_metric(profile, OVERVIEW_SEGMENT, metric.key)
                .unwrap_or(metric.default_value());
            (metric.key, value.to_string())
        })
        .collect();

    let player = profile
        .pointer("/platformInfo/platformUserIdentifier")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    StatView { game, player, stats }
}
