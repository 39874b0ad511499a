use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use innkeep::config::RateLimitConfig;
use serde_json::json;
use tracing::warn;

/// Fixed-window request counter per source address for the public contact
/// endpoint. A window opens on the first request from an address and resets
/// once the configured duration has elapsed; counts do not slide.
pub(crate) struct ContactRateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, WindowSlot>>,
}

struct WindowSlot {
    opened: Instant,
    count: u32,
}

impl ContactRateLimiter {
    pub(crate) fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit and report whether the address is still within quota.
    /// A zero quota disables enforcement entirely.
    pub(crate) fn allow(&self, source: IpAddr, now: Instant) -> bool {
        if self.max_requests == 0 {
            return true;
        }

        let mut guard = self.windows.lock().expect("rate limit mutex poisoned");
        let slot = guard.entry(source).or_insert(WindowSlot {
            opened: now,
            count: 0,
        });
        if now.duration_since(slot.opened) >= self.window {
            slot.opened = now;
            slot.count = 0;
        }
        slot.count += 1;
        slot.count <= self.max_requests
    }
}

pub(crate) async fn enforce_contact_quota(
    State(limiter): State<Arc<ContactRateLimiter>>,
    ConnectInfo(source): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.allow(source.ip(), Instant::now()) {
        return next.run(request).await;
    }

    warn!(%source, "contact rate limit exceeded");
    let payload = json!({
        "error": "Too many contact requests. Please try again later.",
    });
    (StatusCode::TOO_MANY_REQUESTS, Json(payload)).into_response()
}
