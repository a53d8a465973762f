//! Per-run state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serein_runtime::Value;
use tokio::sync::Notify;

/// Cooperative cancellation shared between a run and its host.
///
/// Cloning yields another handle to the same token.
#[derive(Clone, Default, Debug)]
pub struct CancellationToken {
    inner: Arc<TokenState>,
}

#[derive(Default, Debug)]
struct TokenState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            // Registered before the flag check so a concurrent `cancel`
            // cannot slip between the two.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// State of one script invocation: variables, the pending return and
/// run options.
///
/// A context belongs to exactly one run. Variables are a single flat map,
/// matching the analyzer's flat symbol table.
#[derive(Debug)]
pub struct InvocationContext {
    variables: Mutex<FxHashMap<Arc<str>, Value>>,
    should_return: AtomicBool,
    return_value: Mutex<Option<Value>>,
    strict_null: bool,
    token: CancellationToken,
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationContext {
    pub fn new() -> Self {
        InvocationContext {
            variables: Mutex::new(FxHashMap::default()),
            should_return: AtomicBool::new(false),
            return_value: Mutex::new(None),
            strict_null: true,
            token: CancellationToken::new(),
        }
    }

    /// When off, member, index and method access on null yields null
    /// instead of failing.
    #[must_use]
    pub fn with_strict_null(mut self, strict_null: bool) -> Self {
        self.strict_null = strict_null;
        self
    }

    /// Share a cancellation token with the host.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Bind a host argument before the run starts.
    #[must_use]
    pub fn with_arg(self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    pub fn strict_null(&self) -> bool {
        self.strict_null
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Current value of a variable; unassigned names read as null.
    pub fn get(&self, name: &str) -> Value {
        self.variables.lock().get(name).cloned().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.lock().contains_key(name)
    }

    pub fn set(&self, name: &str, value: Value) {
        let mut variables = self.variables.lock();
        match variables.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                variables.insert(Arc::from(name), value);
            }
        }
    }

    /// Snapshot of the variables, sorted by name.
    pub fn variables(&self) -> Vec<(Arc<str>, Value)> {
        let mut out: Vec<_> = self
            .variables
            .lock()
            .iter()
            .map(|(k, v)| (Arc::clone(k), v.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn should_return(&self) -> bool {
        self.should_return.load(Ordering::Acquire)
    }

    /// Record an explicit `return` and stop further statements.
    pub(crate) fn request_return(&self, value: Value) {
        *self.return_value.lock() = Some(value);
        self.should_return.store(true, Ordering::Release);
    }

    pub(crate) fn take_return(&self) -> Option<Value> {
        self.return_value.lock().take()
    }

    /// Reset the return signal so the context can run again.
    pub(crate) fn reset_return(&self) {
        self.should_return.store(false, Ordering::Release);
        self.return_value.lock().take();
    }

    /// Release everything the run holds: dispose host objects, clear the
    /// variables and cancel outstanding work.
    pub fn on_exit(&self) {
        let drained: Vec<Value> = self.variables.lock().drain().map(|(_, v)| v).collect();
        let mut disposed: Vec<&Value> = Vec::new();
        for value in &drained {
            if let Value::External(external) = value {
                if disposed.iter().any(|seen| seen.same_reference(value)) {
                    continue;
                }
                external.dispose();
                disposed.push(value);
            }
        }
        tracing::debug!(disposed = disposed.len(), "invocation context exited");
        self.token.cancel();
    }
}
