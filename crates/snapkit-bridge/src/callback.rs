//! Single-shot result delivery to the shell.

use serde_json::Value;

/// The terminal outcome of an invocation: a JSON success payload or a
/// human-readable error message.
pub type Outcome = Result<Value, String>;

/// A success/error continuation that fires exactly once.
///
/// Shell bridges promise their callers one outcome per invocation: never
/// both, never zero. This type enforces the "never both" half: the delegate
/// is consumed on first fire and later fires are dropped with a warning.
/// The "never zero" half is the session state machine's job; as a safety
/// net, dropping an unfired callback is logged.
pub struct Callback {
    delegate: Option<Box<dyn FnOnce(Outcome) + Send>>,
}

impl Callback {
    /// Wrap the shell's continuation.
    pub fn new(delegate: impl FnOnce(Outcome) + Send + 'static) -> Self {
        Self {
            delegate: Some(Box::new(delegate)),
        }
    }

    /// Deliver a success payload.
    pub fn success(&mut self, payload: Value) {
        self.fire(Ok(payload));
    }

    /// Deliver an error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.fire(Err(message.into()));
    }

    /// Whether an outcome has already been delivered.
    pub fn is_spent(&self) -> bool {
        self.delegate.is_none()
    }

    fn fire(&mut self, outcome: Outcome) {
        match self.delegate.take() {
            Some(delegate) => delegate(outcome),
            None => log::warn!("callback fired more than once; extra outcome dropped"),
        }
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("spent", &self.is_spent())
            .finish()
    }
}

impl Drop for Callback {
    fn drop(&mut self) {
        if self.delegate.is_some() {
            log::warn!("callback dropped without delivering an outcome");
        }
    }
}
