use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::games::ALL_GAMES;
use crate::global::Global;

pub mod stats;

#[derive(serde::Serialize)]
pub struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    endpoints: Vec<String>,
}

#[tracing::instrument(skip(global))]
pub async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    let endpoints: Vec<String> = ALL_GAMES
        .iter()
        .flat_map(|g| [format!("/stats/{}", g.slug()), format!("/stats/{}/view", g.slug())])
        .collect();

    Json(RootResponse {
        message: "TRN Stats Relay",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        endpoints,
    })
}
