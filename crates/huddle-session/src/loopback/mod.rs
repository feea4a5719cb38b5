//! In-memory collaborators for tests and the demo binary.
//!
//! [`LoopbackSignaling`] and [`LoopbackMedia`] keep their state in memory,
//! record every call, and let a driver inject peer activity (joins, leaves,
//! chat, publishes) or script a failure for any operation.

mod media;
mod signaling;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::TransportError;

pub use media::{LoopbackMedia, LoopbackTrack, TrackState};
pub use signaling::LoopbackSignaling;

/// Capacity of each subscriber channel.
const EVENT_BUFFER: usize = 256;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Call log plus scripted failures, keyed by operation name.
#[derive(Debug, Default)]
struct Script {
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, TransportError>,
}

impl Script {
    /// Record a call and return its scripted failure, if any.
    fn call(&mut self, op: &'static str) -> Result<(), TransportError> {
        self.calls.push(op);
        match self.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
