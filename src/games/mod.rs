use std::fmt;
use std::str::FromStr;

pub mod apex;
pub mod cod;
pub mod fortnite;
pub mod valorant;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Fortnite,
    Apex,
    Valorant,
    #[serde(rename = "cod")]
    CallOfDuty,
}

/// Every game the relay knows about, in menu order.
pub const ALL_GAMES: [Game; 4] = [Game::Fortnite, Game::Apex, Game::Valorant, Game::CallOfDuty];

impl Game {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Fortnite => "fortnite",
            Self::Apex => "apex",
            Self::Valorant => "valorant",
            Self::CallOfDuty => "cod",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "fortnite" => Some(Self::Fortnite),
            "apex" => Some(Self::Apex),
            "valorant" => Some(Self::Valorant),
            "cod" | "warzone" => Some(Self::CallOfDuty),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fortnite => "Fortnite Battle Royale",
            Self::Apex => "Apex Legends",
            Self::Valorant => "Valorant",
            Self::CallOfDuty => "Call of Duty: Warzone",
        }
    }

    /// Path segment used by the provider's `/v2/{game}/standard/profile` routes.
    pub fn provider_slug(&self) -> &'static str {
        match self {
            Self::Fortnite => fortnite::PROVIDER_SLUG,
            Self::Apex => apex::PROVIDER_SLUG,
            Self::Valorant => valorant::PROVIDER_SLUG,
            Self::CallOfDuty => cod::PROVIDER_SLUG,
        }
    }

    /// Platforms a user may pick. Empty for games keyed by Riot ID.
    pub fn platforms(&self) -> &'static [Platform] {
        match self {
            Self::Fortnite => fortnite::PLATFORMS,
            Self::Apex => apex::PLATFORMS,
            Self::Valorant => &[],
            Self::CallOfDuty => cod::PLATFORMS,
        }
    }

    pub fn default_platform(&self) -> Option<&'static str> {
        match self {
            Self::Fortnite => Some(fortnite::DEFAULT_PLATFORM),
            Self::Apex | Self::Valorant | Self::CallOfDuty => None,
        }
    }

    pub fn metrics(&self) -> &'static [Metric] {
        match self {
            Self::Fortnite => fortnite::METRICS,
            Self::Apex => apex::METRICS,
            Self::Valorant => valorant::METRICS,
            Self::CallOfDuty => cod::METRICS,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown game '{0}' (expected one of fortnite, apex, valorant, cod)")]
pub struct UnknownGame(pub String);

impl FromStr for Game {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(&s.to_ascii_lowercase()).ok_or_else(|| UnknownGame(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Platform {
    pub slug: &'static str,
    pub label: &'static str,
}

impl Platform {
    const fn new(slug: &'static str, label: &'static str) -> Self {
        Self { slug, label }
    }
}

/// What a metric measures; decides the placeholder shown when the
/// provider omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Count,
    Ratio,
    Percentage,
    Descriptive,
    Rank,
}

impl MetricKind {
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::Count => "0",
            Self::Ratio => "0.00",
            Self::Percentage => "0%",
            Self::Descriptive => "N/A",
            Self::Rank => "Unranked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Metric {
    /// Key inside the provider's `stats` mapping.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: MetricKind,
}

impl Metric {
    const fn new(key: &'static str, label: &'static str, kind: MetricKind) -> Self {
        Self { key, label, kind }
    }

    pub fn default_value(&self) -> &'static str {
        self.kind.default_value()
    }
}
