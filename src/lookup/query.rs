use crate::games::{valorant, Game};

use super::LookupError;

/// Raw search input as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct LookupParams {
    pub username: Option<String>,
    pub tag: Option<String>,
    pub platform: Option<String>,
}

impl LookupParams {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn to_query(&self, game: Game) -> Result<LookupQuery, LookupError> {
        LookupQuery::new(
            game,
            self.username.as_deref().unwrap_or_default(),
            self.tag.as_deref(),
            self.platform.as_deref(),
        )
    }
}

/// How the provider identifies the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerId {
    Platform {
        platform: &'static str,
        username: String,
    },
    Riot {
        username: String,
        tag: String,
    },
}

/// A validated search. Only constructible through [`LookupQuery::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    game: Game,
    player: PlayerId,
}

impl LookupQuery {
    /// Checks run in order: username, then tag (Valorant), then platform.
    pub fn new(
        game: Game,
        username: &str,
        tag: Option<&str>,
        platform: Option<&str>,
    ) -> Result<Self, LookupError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LookupError::validation("username required"));
        }

        let player = match game {
            Game::Valorant => {
                // Users paste `#EUW` or `EUW#`; the first `#` is dropped.
                let tag = tag.unwrap_or_default().replacen('#', "", 1);
                let tag = tag.trim();
                if tag.is_empty() {
                    return Err(LookupError::validation("tag required"));
                }

                PlayerId::Riot {
                    username: username.to_string(),
                    tag: tag.to_string(),
                }
            }
            Game::Fortnite | Game::Apex | Game::CallOfDuty => PlayerId::Platform {
                platform: resolve_platform(game, platform)?,
                username: username.to_string(),
            },
        };

        Ok(Self { game, player })
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn username(&self) -> &str {
        match &self.player {
            PlayerId::Platform { username, .. } | PlayerId::Riot { username, .. } => username,
        }
    }

    pub fn platform(&self) -> &'static str {
        match &self.player {
            PlayerId::Platform { platform, .. } => platform,
            PlayerId::Riot { .. } => valorant::PLATFORM,
        }
    }
}

fn resolve_platform(game: Game, requested: Option<&str>) -> Result<&'static str, LookupError> {
    let requested = requested.map(str::trim).filter(|p| !p.is_empty());

    let Some(slug) = requested.or(game.default_platform()) else {
        return Err(LookupError::validation("platform required"));
    };

    game.platforms()
        .iter()
        .find(|p| p.slug.eq_ignore_ascii_case(slug))
        .map(|p| p.slug)
        .ok_or_else(|| {
            LookupError::validation(format!(
                "unsupported platform '{}' for {}",
                slug,
                game.display_name()
            ))
        })
}
