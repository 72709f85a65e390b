//! Shared call recording and pausing for the mock adapters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

/// Call log plus per-method pause points.
#[derive(Debug, Default)]
pub(crate) struct CallLog {
    calls: Vec<MethodCall>,
    pauses: HashMap<String, Arc<Notify>>,
}

impl CallLog {
    pub(crate) fn record(&mut self, method: &str, args: Vec<String>) -> Option<Arc<Notify>> {
        self.calls.push(MethodCall {
            method: method.to_string(),
            args,
        });
        self.pauses.remove(method)
    }

    pub(crate) fn pause(&mut self, method: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.pauses.insert(method.to_string(), Arc::clone(&gate));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<MethodCall> {
        self.calls.clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.calls.iter().filter(|c| c.method == method).count()
    }
}

/// Locks a mock's state, recovering from a panicked test thread.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
