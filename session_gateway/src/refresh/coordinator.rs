//! Single-flight refresh coordination.
//!
//! Many parallel requests failing with 401 for the same reason must trigger
//! exactly one upstream refresh; the rest wait for that flight to settle and
//! are then replayed once. State is an explicit owned map keyed per browser
//! session, so sessions on a multi-tenant gateway never cross-contaminate.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::gate::is_credential_path;

use super::errors::{InterceptError, RefreshError};
use super::upstream::RefreshUpstream;

/// Which try of an intercepted request is running. A replay is marked so it
/// can never re-enter the refresh path, even if it fails again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Replay,
}

type FlightResult = Result<(), RefreshError>;

type FlightMap = HashMap<String, broadcast::Sender<FlightResult>>;

pub struct RefreshCoordinator<U> {
    upstream: U,
    /// In-flight refreshes, keyed per browser session. An entry's sender
    /// releases every request queued on that flight when it settles. A std
    /// mutex: it is never held across an await, and the cancellation guard
    /// must be able to lock it from `Drop`.
    flights: Mutex<FlightMap>,
}

/// Removes a flight entry when the owning future is dropped before
/// settling (client disconnect cancels the handler future mid-refresh).
/// Waiters on the dead flight then observe a closed channel instead of
/// hanging, and the next 401 for the session can start a fresh flight.
struct FlightGuard<'a> {
    flights: &'a Mutex<FlightMap>,
    session_key: &'a str,
    armed: bool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Refresh flight abandoned; releasing its entry");
            // Never panic in drop: a poisoned lock means the process is
            // already unwinding.
            if let Ok(mut flights) = self.flights.lock() {
                flights.remove(self.session_key);
            }
        }
    }
}

impl<U: RefreshUpstream> RefreshCoordinator<U> {
    pub fn new(upstream: U) -> Self {
        Self {
            upstream,
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Run a request through the interceptor.
    ///
    /// `send` is invoked with [`Attempt::First`]; when it reports 401 and the
    /// path is not a credential endpoint (those surface their own 401s, which
    /// also keeps the refresh call itself out of the loop), the coordinator
    /// joins the session's refresh flight and, on success, invokes `send`
    /// once more with [`Attempt::Replay`].
    pub async fn dispatch<T, F, Fut>(
        &self,
        session_key: &str,
        path: &str,
        send: F,
    ) -> Result<T, InterceptError>
    where
        F: Fn(Attempt) -> Fut,
        Fut: Future<Output = Result<T, InterceptError>>,
    {
        match send(Attempt::First).await {
            Ok(value) => Ok(value),
            Err(InterceptError::Unauthorized) if !is_credential_path(path) => {
                self.join_refresh(session_key).await?;
                send(Attempt::Replay).await
            }
            Err(err) => Err(err),
        }
    }

    /// Join the session's refresh flight, starting one if none is in flight.
    ///
    /// The present-or-absent check and the flight registration happen under
    /// one lock acquisition; two requests observing "no flight" concurrently
    /// is therefore impossible.
    async fn join_refresh(&self, session_key: &str) -> Result<(), RefreshError> {
        let waiter = {
            let mut flights = self.flights.lock().expect("flights lock poisoned");
            match flights.get(session_key) {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    flights.insert(session_key.to_string(), tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            tracing::debug!("Refresh in flight; queueing request");
            return match rx.recv().await {
                Ok(result) => result,
                // Closed channel: the owning flight was dropped before it
                // could settle.
                Err(_) => Err(RefreshError::Interrupted),
            };
        }

        // This future owns the flight; the guard covers the await below.
        let mut guard = FlightGuard {
            flights: &self.flights,
            session_key,
            armed: true,
        };

        tracing::debug!("Starting refresh flight");
        let result = self.upstream.refresh(session_key).await;

        {
            let mut flights = self.flights.lock().expect("flights lock poisoned");
            if let Some(tx) = flights.remove(session_key) {
                // No receivers means nobody queued during the flight.
                let _ = tx.send(result.clone());
            }
        }
        guard.armed = false;
        result
    }
}
