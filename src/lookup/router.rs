use axum::http::Method;
use urlencoding::encode;

use crate::games::valorant;

use super::query::{LookupQuery, PlayerId};

/// Public TRN API host.
pub const DEFAULT_BASE_URL: &str = "https://public-api.tracker.gg";

/// A single request the fetch collaborator should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamDescriptor {
    pub url: String,
    pub method: Method,
}

/// Build the provider profile request for a validated query.
///
/// The `#` of a Riot ID is always sent as `%23` so the provider sees one
/// path segment.
pub fn route(base_url: &str, query: &LookupQuery) -> UpstreamDescriptor {
    let profile_key = match query.player() {
        PlayerId::Platform { platform, username } => {
            format!("{}/{}", platform, encode(username))
        }
        PlayerId::Riot { username, tag } => {
            format!("{}/{}%23{}", valorant::PLATFORM, encode(username), encode(tag))
        }
    };

    let url = format!(
        "{}/v2/{}/standard/profile/{}",
        base_url.trim_end_matches('/'),
        query.game().provider_slug(),
        profile_key
    );

    UpstreamDescriptor {
        url,
        method: Method::GET,
    }
}
