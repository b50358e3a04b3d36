//! Resilient HTTP session with Fibonacci retry backoff
//!
//! The session owns the entire retry/timeout policy; callers issue a single
//! logical GET and receive either a response body or a terminal failure.

use std::time::{Duration, Instant};

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("request failed: {message}")]
    Transport { message: String },
    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },
}

impl SessionError {
    fn is_retryable(&self) -> bool {
        match self {
            SessionError::Transport { .. } => true,
            SessionError::ServerError { status } => *status >= 500,
        }
    }
}

/// Retry and timeout budget for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of attempts per logical request.
    pub max_tries: u32,
    /// Total time budget across all attempts.
    pub max_time: Duration,
    /// Cap on the inter-attempt backoff interval.
    pub max_backoff: Duration,
    /// TCP connect timeout; `None` leaves the transport default.
    pub connect_timeout: Option<Duration>,
    /// Per-request timeout; `None` means no hard deadline.
    pub request_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Patient preset for command-line and batch callers.
    pub fn command_line() -> Self {
        Self {
            max_tries: 10,
            max_time: Duration::from_secs(120),
            max_backoff: Duration::from_secs(15),
            connect_timeout: None,
            request_timeout: None,
        }
    }

    /// Impatient preset for latency-sensitive service-to-service callers.
    pub fn web_service() -> Self {
        Self {
            max_tries: 3,
            max_time: Duration::from_secs(3),
            max_backoff: Duration::from_secs(1),
            connect_timeout: Some(Duration::from_millis(3200)),
            request_timeout: Some(Duration::from_secs(2)),
        }
    }
}

pub struct Session {
    client: Client,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Issues a GET, retrying transport errors and 5xx responses on a
    /// Fibonacci backoff curve until the retry budget is spent. 4xx
    /// responses fail immediately.
    pub async fn get(&self, url: &str) -> Result<String, SessionError> {
        debug!(%url, "GET");
        let started = Instant::now();
        let mut backoff = FibonacciBackoff::new(self.config.max_backoff);
        let mut tries = 0;

        loop {
            tries += 1;
            match self.try_get(url).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    if !err.is_retryable()
                        || tries >= self.config.max_tries
                        || started.elapsed() >= self.config.max_time
                    {
                        return Err(err);
                    }
                    let delay = backoff.next_delay();
                    warn!(%url, tries, ?delay, "retrying after {err}");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn try_get(&self, url: &str) -> Result<String, SessionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SessionError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::ServerError {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SessionError::Transport {
            message: e.to_string(),
        })
    }
}

/// Fibonacci delay sequence (1, 1, 2, 3, 5, ... seconds) capped at a maximum.
struct FibonacciBackoff {
    current: Duration,
    next: Duration,
    cap: Duration,
}

impl FibonacciBackoff {
    fn new(cap: Duration) -> Self {
        Self {
            current: Duration::from_secs(1),
            next: Duration::from_secs(1),
            cap,
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.current.min(self.cap);
        let following = self.current + self.next;
        self.current = self.next;
        self.next = following;
        delay
    }
}
