use std::time::{Duration, Instant};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::models::session_models::SessionStatus;
use crate::services::session_services::session_cache_service::SessionCache;

static SESSION_TIMERS: OnceCell<SessionTimers> = OnceCell::new();

/// Registry of cancellation handles for live session clocks. Cancelling a token
/// stops the timer task; the task deregisters itself on the way out, so a
/// session never outlives its clock and a clock never outlives its session.
pub struct SessionTimers {
    timers: DashMap<String, CancellationToken>,
}

impl SessionTimers {
    pub fn global() -> &'static Self {
        if SESSION_TIMERS.get().is_none() {
            SESSION_TIMERS
                .set(SessionTimers {
                    timers: DashMap::new(),
                })
                .ok();
        }
        SESSION_TIMERS.get().unwrap()
    }

    fn register(&self, session_id: &str, token: CancellationToken) {
        self.timers.insert(session_id.to_string(), token);
    }

    fn deregister(&self, session_id: &str) {
        self.timers.remove(session_id);
    }

    pub fn cancel(&self, session_id: &str) {
        if let Some((_, token)) = self.timers.remove(session_id) {
            token.cancel();
        }
    }
}

/// Spawns the clock for one session. Each tick passes the measured wall-clock
/// delta since the previous tick to the session, so a delayed callback consumes
/// the time that actually passed instead of a fixed period.
pub fn spawn_session_timer(session_id: String, tick_period_ms: u64) {
    let token = CancellationToken::new();
    SessionTimers::global().register(&session_id, token.clone());

    tokio::spawn(async move {
        let cache = SessionCache::new();
        let mut interval = tokio::time::interval(Duration::from_millis(tick_period_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately; it only
        // establishes the baseline for the delta.
        interval.tick().await;
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    let now = Instant::now();
                    let elapsed_ms = now.duration_since(last_tick).as_millis() as u64;
                    last_tick = now;
                    match cache.tick_session(&session_id, elapsed_ms) {
                        Some(SessionStatus::Running) => {}
                        Some(SessionStatus::Expired) => {
                            println!("Session {} expired", session_id);
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        SessionTimers::global().deregister(&session_id);
    });
}
