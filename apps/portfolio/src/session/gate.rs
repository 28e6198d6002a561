use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::store::profile_key;

/// Per-profile in-flight marker for draft submissions. A second submission
/// for a name that is already being stored is turned away.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held while a submission runs; dropping it reopens the gate.
#[derive(Debug)]
pub struct GateGuard {
    gate: SubmissionGate,
    key: String,
}

impl SubmissionGate {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Claims `name`, or returns `None` while another submission holds it.
    /// Names are keyed exactly as the profile store keys them.
    pub fn try_acquire(&self, name: &str) -> Option<GateGuard> {
        let key = profile_key(name).to_string();
        if self.lock().insert(key.clone()) {
            Some(GateGuard {
                gate: self.clone(),
                key,
            })
        } else {
            None
        }
    }
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.gate.lock().remove(&self.key);
    }
}
