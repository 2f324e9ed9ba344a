use std::time::Duration;

use crate::config::GLOBAL_CONFIG;
use crate::services::session_services::{
    session_cache_service::SessionCache, session_timer_service::SessionTimers,
};

pub struct CleanupService;

impl CleanupService {
    /// Periodic sweep removing sessions that stayed expired past the linger
    /// window, together with any timer handle still registered for them.
    pub async fn run(&self) {
        let session_configs = &GLOBAL_CONFIG.get().unwrap().session_configs;
        let linger = Duration::from_millis(session_configs.expired_linger_ms);
        let mut interval =
            tokio::time::interval(Duration::from_millis(session_configs.reap_interval_ms));

        loop {
            interval.tick().await;
            let reaped = SessionCache::new().reap_expired(linger);
            for session_id in reaped {
                SessionTimers::global().cancel(&session_id);
                println!("Removed expired session: {}", session_id);
            }
        }
    }
}
