use tokio::sync::Mutex;

use crate::games::Game;
use crate::trn::Fetcher;

use super::{execute, normalize, LookupError, LookupParams, StatView};

/// What to do with a response that lands after a newer search was submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Whichever response resolves last is displayed, even if it belongs to
    /// an older search.
    LastResponseWins,
    /// Responses are stamped with the generation of their search and
    /// dropped if a newer search has started since.
    #[default]
    DropStale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Searching { generation: u64, game: Game },
    Success(StatView),
    Failed(LookupError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The lookup resolved and its result is now the displayed state.
    Displayed(LookupState),
    /// A newer search started first; this result was discarded.
    Superseded,
}

struct Slot {
    generation: u64,
    state: LookupState,
}

/// One user's search box: at most one displayed result, replaced wholesale
/// on every submission.
pub struct LookupSession<F> {
    fetcher: F,
    base_url: String,
    policy: StalePolicy,
    slot: Mutex<Slot>,
}

impl<F: Fetcher> LookupSession<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>, policy: StalePolicy) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            policy,
            slot: Mutex::new(Slot {
                generation: 0,
                state: LookupState::Idle,
            }),
        }
    }

    pub async fn state(&self) -> LookupState {
        self.slot.lock().await.state.clone()
    }

    /// Validate and run a search.
    ///
    /// Invalid input is returned as `Err` without touching the displayed
    /// state and without any request being made.
    #[tracing::instrument(skip(self, params))]
    pub async fn submit(&self, game: Game, params: &LookupParams) -> Result<Outcome, LookupError> {
        let query = params.to_query(game)?;

        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.state = LookupState::Searching {
                generation: slot.generation,
                game,
            };
            slot.generation
        };

        let next = match execute(&self.fetcher, &self.base_url, &query).await {
            Ok(profile) => LookupState::Success(normalize(&profile, game)),
            Err(e) => LookupState::Failed(e),
        };

        let mut slot = self.slot.lock().await;
        if self.policy == StalePolicy::DropStale && slot.generation != generation {
            tracing::debug!(generation, current = slot.generation, "dropping stale lookup response");
            return Ok(Outcome::Superseded);
        }

        slot.state = next.clone();
        Ok(Outcome::Displayed(next))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use bytes::Bytes;
    use serde_json::json;
    use tokio::sync::Notify;
    use tracing_test::traced_test;

    use super::*;
    use crate::games::ALL_GAMES;
    use crate::lookup::{LookupErrorKind, UpstreamDescriptor, DEFAULT_BASE_URL};
    use crate::trn::testing::FakeFetcher;
    use crate::trn::{FetchError, FetchResponse};

    fn profile(wins: &str) -> String {
        json!({
            "data": {
                "platformInfo": { "platformUserIdentifier": wins },
                "segments": [{ "type": "overview", "stats": { "wins": { "displayValue": wins } } }]
            }
        })
        .to_string()
    }

    /// Holds the request for username `slow` until the gate is released.
    struct GatedFetcher {
        gate: Notify,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Fetcher for GatedFetcher {
        async fn fetch(&self, descriptor: &UpstreamDescriptor) -> Result<FetchResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let wins = if descriptor.url.ends_with("/slow") {
                self.gate.notified().await;
                "1"
            } else {
                "2"
            };

            Ok(FetchResponse {
                status: 200,
                body: Bytes::from(profile(wins)),
            })
        }
    }

    fn gated() -> Arc<GatedFetcher> {
        Arc::new(GatedFetcher {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }

    async fn race(policy: StalePolicy) -> (Outcome, LookupState) {
        let fetcher = gated();
        let session = Arc::new(LookupSession::new(fetcher.clone(), DEFAULT_BASE_URL, policy));

        let slow = tokio::spawn({
            let session = session.clone();
            async move {
                session
                    .submit(Game::Fortnite, &LookupParams::new("slow"))
                    .await
            }
        });

        while fetcher.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            session.state().await,
            LookupState::Searching {
                generation: 1,
                game: Game::Fortnite
            }
        );

        let fast = session
            .submit(Game::Fortnite, &LookupParams::new("fast"))
            .await
            .unwrap();
        let Outcome::Displayed(LookupState::Success(view)) = fast else {
            panic!("expected fast lookup to succeed, got {fast:?}");
        };
        assert_eq!(view.get("wins"), Some("2"));

        fetcher.gate.notify_one();
        let slow = slow.await.unwrap().unwrap();

        (slow, session.state().await)
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let session = LookupSession::new(FakeFetcher::json(200, json!({})), DEFAULT_BASE_URL, StalePolicy::default());
        assert_eq!(session.state().await, LookupState::Idle);
    }

    #[tokio::test]
    async fn test_empty_username_never_fetches() {
        let fetcher = Arc::new(FakeFetcher::json(200, json!({ "data": {} })));
        let session = LookupSession::new(fetcher.clone(), DEFAULT_BASE_URL, StalePolicy::default());

        for game in ALL_GAMES {
            let params = LookupParams::new("   ").with_tag("EUW").with_platform("psn");
            let err = session.submit(game, &params).await.unwrap_err();
            assert_eq!(err.kind, LookupErrorKind::ValidationFailed);
            assert_eq!(err.message, "username required");
        }

        assert_eq!(fetcher.calls(), 0);
        assert_eq!(session.state().await, LookupState::Idle);
    }

    #[tokio::test]
    async fn test_valorant_requires_tag() {
        let fetcher = Arc::new(FakeFetcher::respond(200, profile("7")));
        let session = LookupSession::new(fetcher.clone(), DEFAULT_BASE_URL, StalePolicy::default());

        let err = session
            .submit(Game::Valorant, &LookupParams::new("Foo").with_tag(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, LookupErrorKind::ValidationFailed);
        assert_eq!(err.message, "tag required");
        assert_eq!(fetcher.calls(), 0);

        let outcome = session
            .submit(Game::Valorant, &LookupParams::new("Foo").with_tag("EUW"))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Displayed(LookupState::Success(_))));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_displayed() {
        let failing = LookupSession::new(
            FakeFetcher::json(404, json!({ "message": "Player not found" })),
            DEFAULT_BASE_URL,
            StalePolicy::default(),
        );
        let outcome = failing
            .submit(Game::Apex, &LookupParams::new("ghost").with_platform("origin"))
            .await
            .unwrap();

        let Outcome::Displayed(LookupState::Failed(err)) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(err.kind, LookupErrorKind::UpstreamError);
        assert_eq!(err.message, "Player not found");
        assert_eq!(err.status, Some(404));
        assert_eq!(failing.state().await, LookupState::Failed(err));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let session = LookupSession::new(FakeFetcher::timeout(), DEFAULT_BASE_URL, StalePolicy::default());

        session
            .submit(Game::CallOfDuty, &LookupParams::new("ghost").with_platform("battle"))
            .await
            .unwrap();

        let LookupState::Failed(err) = session.state().await else {
            panic!("expected failed state");
        };
        assert_eq!(err.kind, LookupErrorKind::NetworkFailure);
    }

    #[tokio::test]
    async fn test_resubmit_discards_previous_view() {
        let fetcher = gated();
        let session = LookupSession::new(fetcher.clone(), DEFAULT_BASE_URL, StalePolicy::default());

        session
            .submit(Game::Fortnite, &LookupParams::new("fast"))
            .await
            .unwrap();
        session
            .submit(Game::Apex, &LookupParams::new("fast").with_platform("psn"))
            .await
            .unwrap();

        let LookupState::Success(view) = session.state().await else {
            panic!("expected success");
        };
        assert_eq!(view.game, Game::Apex);
        assert!(view.get("top10").is_none());
        assert_eq!(view.get("wins"), Some("2"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_drop_stale_keeps_newest_result() {
        let (slow, state) = race(StalePolicy::DropStale).await;

        assert_eq!(slow, Outcome::Superseded);
        let LookupState::Success(view) = state else {
            panic!("expected success");
        };
        assert_eq!(view.get("wins"), Some("2"));
        assert!(logs_contain("dropping stale lookup response"));
    }

    #[tokio::test]
    async fn test_last_response_wins() {
        let (slow, state) = race(StalePolicy::LastResponseWins).await;

        assert!(matches!(slow, Outcome::Displayed(LookupState::Success(_))));
        let LookupState::Success(view) = state else {
            panic!("expected success");
        };
        assert_eq!(view.get("wins"), Some("1"));
    }
}
