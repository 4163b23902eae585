//! Fixed-window request rate limiting keyed by client address

use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{config::RateLimitConfig, error::AppError};

struct Window {
    count: u32,
    started_at: Instant,
}

/// Per-client fixed-window counter.
///
/// The window resets when it expires, not on each request: a client that
/// keeps hammering does not push its own reset forward. Counters are
/// updated under a single lock so concurrent bursts never undercount.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<IpAddr, Window>>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for this client, rejecting past the quota
    pub fn check(&self, client: IpAddr) -> Result<(), AppError> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> Result<(), AppError> {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let window = windows.entry(client).or_insert(Window {
            count: 0,
            started_at: now,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.count = 0;
            window.started_at = now;
        }

        window.count += 1;
        if window.count > self.max_requests {
            tracing::warn!(%client, "Rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}

/// Middleware gating every route before its handler runs
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check(addr.ip())?;
    Ok(next.run(request).await)
}
