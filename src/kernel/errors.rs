use thiserror::Error;

use super::types::{Operation, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A core invariant was broken. The kernel must be treated as unusable.
    #[error("EXODUS BREACHED: {reason}")]
    IntegrityViolation { reason: String },

    /// Caller sequencing error. The kernel stays usable.
    #[error("EXODUS BREACHED: invalid phase order for {operation}: expected phase_index={expected}, found={found}")]
    OutOfOrderOperation {
        operation: Operation,
        expected: Phase,
        found: Phase,
    },

    #[error("EXODUS BREACHED: {operation} requires {required}, found {found}")]
    PreconditionViolation {
        operation: Operation,
        required: String,
        found: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Integrity,
    OutOfOrder,
    Precondition,
}

impl KernelError {
    pub(crate) fn integrity(reason: impl Into<String>) -> Self {
        KernelError::IntegrityViolation {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::IntegrityViolation { .. } => ErrorKind::Integrity,
            KernelError::OutOfOrderOperation { .. } => ErrorKind::OutOfOrder,
            KernelError::PreconditionViolation { .. } => ErrorKind::Precondition,
        }
    }

    /// Precondition failures mean state and phase drifted apart, which is as
    /// serious as a broken seal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, KernelError::OutOfOrderOperation { .. })
    }
}
