//! Per-key request coalescing.
//!
//! The first caller for a key becomes the leader and does the work. Callers
//! arriving while it runs become followers and receive a clone of the
//! leader's result. The key is released when the leader finishes or is
//! dropped; if a leader goes away without a result (panic, cancellation)
//! its followers do the work themselves.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

type Inflight<T> = Arc<Mutex<HashMap<String, watch::Receiver<Option<T>>>>>;

/// Registry of in-flight work, keyed by string.
pub struct SingleFlight<T> {
    inflight: Inflight<T>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// How a caller takes part in a flight.
pub enum FlightRole<T> {
    Leader(FlightGuard<T>),
    Follower(watch::Receiver<Option<T>>),
}

/// Held by the leader. Dropping it releases the key.
pub struct FlightGuard<T> {
    key: String,
    sender: watch::Sender<Option<T>>,
    inflight: Inflight<T>,
}

impl<T> FlightGuard<T> {
    /// Publish the result to every follower.
    pub fn finish(self, value: T) {
        // Followers may all have gone away; nothing to do then.
        let _ = self.sender.send(Some(value));
    }
}

impl<T> Drop for FlightGuard<T> {
    fn drop(&mut self) {
        let mut map = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&self.key);
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `key`.
    pub fn join(&self, key: &str) -> FlightRole<T> {
        let mut map = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = map.get(key) {
            return FlightRole::Follower(existing.clone());
        }

        let (sender, receiver) = watch::channel(None);
        map.insert(key.to_string(), receiver);
        FlightRole::Leader(FlightGuard {
            key: key.to_string(),
            sender,
            inflight: Arc::clone(&self.inflight),
        })
    }

    /// Number of keys currently being worked on.
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Run `work` for `key`, or wait for the leader already running it.
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.join(key) {
            FlightRole::Leader(guard) => {
                let value = work().await;
                guard.finish(value.clone());
                value
            }
            FlightRole::Follower(mut receiver) => {
                debug!(key, "Waiting on in-flight render");
                let shared = match receiver.wait_for(Option::is_some).await {
                    Ok(value) => value.clone(),
                    Err(_) => None,
                };
                match shared {
                    Some(value) => value,
                    None => {
                        debug!(key, "Leader went away, rendering directly");
                        work().await
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_join_is_follower_until_release() {
        let flights: SingleFlight<u32> = SingleFlight::new();
        let leader = match flights.join("k") {
            FlightRole::Leader(guard) => guard,
            FlightRole::Follower(_) => panic!("first caller must lead"),
        };
        assert!(matches!(flights.join("k"), FlightRole::Follower(_)));
        assert!(matches!(flights.join("other"), FlightRole::Leader(_)));

        leader.finish(1);
        assert_eq!(flights.in_flight(), 0);
        assert!(matches!(flights.join("k"), FlightRole::Leader(_)));
    }
}
