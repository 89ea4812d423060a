use thiserror::Error;

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

/// Container level errors.
/// All of them surface at the call that caused them, nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Container variant doesn't support the operation.
    #[error("operation '{op}' is not supported by this container")]
    Unsupported { op: &'static str },
    /// Protocol misuse, ex. removal without a preceding production.
    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },
    /// Production was requested past the end of traversal.
    #[error("no more elements to produce")]
    Exhausted,
    /// Container was structurally modified while being traversed.
    /// Best effort, absence of this error doesn't imply absence of a race.
    #[error("container was modified during traversal, expected generation {expected} found {found}")]
    ConcurrentModification { expected: u64, found: u64 },
    /// Element is unsuitable for the container.
    #[error("element rejected: {0}")]
    Rejected(RejectReason),
}

/// Why an element was refused for a reason other than being already present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("container is at its capacity of {limit} elements")]
    Capacity { limit: usize },
    #[error("element is outside of the ordered range of the container")]
    Ordering,
    #[error("{0}")]
    Constraint(String),
}

impl CollectionError {
    pub fn unsupported(op: &'static str) -> Self {
        Self::Unsupported { op }
    }

    pub fn invalid_state(reason: &'static str) -> Self {
        Self::InvalidState { reason }
    }

    pub fn concurrent_modification(expected: u64, found: u64) -> Self {
        Self::ConcurrentModification { expected, found }
    }

    pub fn capacity(limit: usize) -> Self {
        Self::Rejected(RejectReason::Capacity { limit })
    }

    pub fn out_of_range() -> Self {
        Self::Rejected(RejectReason::Ordering)
    }

    pub fn constraint(reason: impl Into<String>) -> Self {
        Self::Rejected(RejectReason::Constraint(reason.into()))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// True if repeating the call, possibly with a different element or after
    /// restarting traversal, can succeed.
    pub fn recoverable(&self) -> bool {
        match self {
            Self::Unsupported { .. } => false,
            Self::InvalidState { .. } => false,
            Self::Exhausted => false,
            Self::ConcurrentModification { .. } => true,
            Self::Rejected(_) => true,
        }
    }

    pub fn unrecoverable(&self) -> bool {
        !self.recoverable()
    }
}
