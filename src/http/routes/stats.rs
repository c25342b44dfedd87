use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::games::Game;
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::lookup::{self, LookupParams, LookupQuery};

/// Mounted under `/stats`.
pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/:game", get(get_profile))
        .route("/:game/view", get(get_view))
}

/// Query string extractor whose rejection is a JSON [`ApiError`].
#[derive(FromRequestParts, serde::Deserialize)]
#[from_request(via(Query), rejection(ApiError))]
#[serde(transparent)]
struct Params(LookupParams);

#[derive(serde::Serialize)]
struct ProfileResponse {
    data: serde_json::Value,
}

#[derive(serde::Serialize)]
struct ViewResponse {
    game: Game,
    name: &'static str,
    player: String,
    platform: &'static str,
    stats: Vec<StatRow>,
}

#[derive(serde::Serialize)]
struct StatRow {
    key: &'static str,
    label: &'static str,
    value: String,
}

fn parse_query(game_slug: &str, params: &LookupParams) -> Result<LookupQuery, ApiError> {
    let game = Game::from_slug(game_slug)
        .ok_or_else(|| ApiError::not_found(ApiErrorCode::UNKNOWN_GAME, "unknown game"))?;

    Ok(params.to_query(game)?)
}

/// GET /stats/:game
///
/// Relays the TRN profile for the player as `{data}`. TRN error statuses are
/// passed through with an `{error}` body.
#[tracing::instrument(skip(global))]
async fn get_profile(
    State(global): State<Arc<Global>>,
    Path(game_slug): Path<String>,
    Params(params): Params,
) -> Result<Json<ProfileResponse>, ApiError> {
    let query = parse_query(&game_slug, &params)?;

    let data = lookup::execute(global.fetcher.as_ref(), &global.config.trn.base_url, &query).await?;

    Ok(Json(ProfileResponse { data }))
}

/// GET /stats/:game/view
///
/// Same lookup as [`get_profile`], normalized into labelled display values.
#[tracing::instrument(skip(global))]
async fn get_view(
    State(global): State<Arc<Global>>,
    Path(game_slug): Path<String>,
    Params(params): Params,
) -> Result<Json<ViewResponse>, ApiError> {
    let query = parse_query(&game_slug, &params)?;
    let game = query.game();

    let data = lookup::execute(global.fetcher.as_ref(), &global.config.trn.base_url, &query).await?;
    let view = lookup::normalize(&data, game);

    let stats = view
        .rows()
        .map(|(metric, value)| StatRow {
            key: metric.key,
            label: metric.label,
            value: value.to_string(),
        })
        .collect();

    Ok(Json(ViewResponse {
        game,
        name: game.display_name(),
        player: view.player.clone().unwrap_or_else(|| query.username().to_string()),
        platform: platform_label(game, query.platform()),
        stats,
    }))
}

fn platform_label(game: Game, slug: &'static str) -> &'static str {
    game.platforms()
        .iter()
        .find(|p| p.slug == slug)
        .map(|p| p.label)
        .unwrap_or("Riot ID")
}
