//! Error types and the structured outcome of a property check.

use crate::value::AnyValue;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Main error type for the engine.
///
/// These are errors of the engine itself (bad configuration, impossible
/// domains). A property that does not hold is not an error; it is reported
/// through [`PropertyCheckResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FalsifyError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Invalid arbitrary construction, e.g. `min > max`.
    #[error("Invalid arbitrary: {message}")]
    InvalidArbitrary { message: String },

    /// The textual seed could not be interpreted.
    #[error("Invalid random seed: {seed:?}")]
    InvalidSeed { seed: String },

    /// A filtered generator rejected too many values in a row.
    #[error("Filter rejected {misses} generated values in a row")]
    TooManyFilterMisses { misses: usize },

    /// Exhaustive generation was requested but the domains do not support it.
    #[error("Exhaustive generation not possible: {reason}")]
    ExhaustiveNotPossible { reason: String },
}

impl FalsifyError {
    pub(crate) fn invalid_arbitrary(message: impl Into<String>) -> Self {
        FalsifyError::InvalidArbitrary {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        FalsifyError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, FalsifyError>;

/// The cause attached to a falsified try.
///
/// The original error value is kept behind an `Arc`, never wrapped, so a
/// reporting layer can downcast it or compare it by identity.
#[derive(Error, Debug, Clone)]
pub enum Failure {
    /// The predicate panicked, typically through `assert!`, or reported a
    /// failed assertion. `payload` holds what a panic threw.
    #[error("assertion failed: {message}")]
    Assertion {
        message: String,
        payload: Option<PanicPayload>,
    },

    /// The predicate returned an error.
    #[error("{0}")]
    Error(Arc<dyn std::error::Error + Send + Sync>),

    /// A non-recoverable signal. Never shrunk.
    #[error("fatal: {message}")]
    Fatal { message: String },
}

impl Failure {
    /// Wrap an error returned by a predicate.
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Failure::Error(Arc::new(error))
    }

    /// An assertion-style failure with a message.
    pub fn assertion(message: impl Into<String>) -> Self {
        Failure::Assertion {
            message: message.into(),
            payload: None,
        }
    }

    /// A non-recoverable failure.
    pub fn fatal(message: impl Into<String>) -> Self {
        Failure::Fatal {
            message: message.into(),
        }
    }

    /// Build a failure from a caught panic payload, keeping the payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        Failure::Assertion {
            message,
            payload: Some(PanicPayload(Arc::new(Mutex::new(payload)))),
        }
    }

    /// Whether shrinking may be attempted for this failure.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Failure::Fatal { .. })
    }

    /// The original error when the predicate returned one.
    pub fn as_error(&self) -> Option<&Arc<dyn std::error::Error + Send + Sync>> {
        match self {
            Failure::Error(error) => Some(error),
            _ => None,
        }
    }

    /// The value a panicking predicate threw.
    pub fn panic_payload(&self) -> Option<&PanicPayload> {
        match self {
            Failure::Assertion { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

/// The value thrown by a panic, exactly as `catch_unwind` caught it.
///
/// Shared between clones of the failure that carries it.
#[derive(Clone)]
pub struct PanicPayload(Arc<Mutex<Box<dyn Any + Send>>>);

impl PanicPayload {
    fn with<R>(&self, f: impl FnOnce(&(dyn Any + Send)) -> R) -> R {
        let payload = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&**payload)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.with(|payload| payload.is::<T>())
    }

    /// A copy of the payload if it is a `T`.
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.with(|payload| payload.downcast_ref::<T>().cloned())
    }

    /// Whether both handles refer to the same thrown value.
    pub fn ptr_eq(&self, other: &PanicPayload) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PanicPayload(..)")
    }
}

/// Terminal status of a property check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Every check held.
    Successful,
    /// A try falsified the property.
    Failed,
    /// No verdict: too many discards, no checks at all, or interrupted.
    Exhausted,
}

/// The outcome of checking one property, produced exactly once per run.
#[derive(Debug, Clone)]
pub struct PropertyCheckResult {
    pub property_name: String,
    pub check_status: CheckStatus,
    /// Tries drawn, discarded ones included.
    pub count_tries: usize,
    /// Tries whose assumption held, falsifying ones included.
    pub count_checks: usize,
    /// Accepted shrinking steps.
    pub count_shrinking_steps: usize,
    /// The seed that replays this run.
    pub random_seed: String,
    /// First falsifying tuple, before shrinking.
    pub original_sample: Option<Vec<AnyValue>>,
    /// Minimal falsifying tuple, or the original one when not shrunk.
    pub falsified_sample: Option<Vec<AnyValue>>,
    /// Cause observed for `falsified_sample`; absent for a plain `false`.
    pub throwable: Option<Failure>,
    /// Whether a cancellation signal stopped the run early.
    pub interrupted: bool,
}

impl PropertyCheckResult {
    /// Tries whose assumption did not hold.
    pub fn count_discards(&self) -> usize {
        self.count_tries - self.count_checks
    }

    pub fn is_successful(&self) -> bool {
        self.check_status == CheckStatus::Successful
    }

    pub fn is_failed(&self) -> bool {
        self.check_status == CheckStatus::Failed
    }

    pub fn is_exhausted(&self) -> bool {
        self.check_status == CheckStatus::Exhausted
    }
}
