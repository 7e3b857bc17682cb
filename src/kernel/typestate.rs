//! Compile-time ordering for the exodus sequence.
//!
//! Each step consumes the sequence and hands back the next stage, so calling a
//! step out of order does not type-check. The checked kernel still runs
//! underneath, which keeps the integrity guard and preconditions in force.

use std::marker::PhantomData;

use thiserror::Error;

use super::errors::KernelError;
use super::state_machine::ExodusKernel;
use super::types::{Operation, Phase};

mod sealed {
    pub trait Sealed {}
}

/// A stage of the sequence. Implemented only for the marker types below.
pub trait Stage: sealed::Sealed {
    const PHASE: Phase;
}

#[derive(Debug)]
pub struct SandboxTemple;
#[derive(Debug)]
pub struct TheVoid;
#[derive(Debug)]
pub struct Rewritten;
#[derive(Debug)]
pub struct Exodus;
#[derive(Debug)]
pub struct SummitVisible;

macro_rules! stage {
    ($marker:ty, $phase:expr) => {
        impl sealed::Sealed for $marker {}
        impl Stage for $marker {
            const PHASE: Phase = $phase;
        }
    };
}

stage!(SandboxTemple, Phase::CloseTheEye);
stage!(TheVoid, Phase::ChangeTheMovie);
stage!(Rewritten, Phase::ExecuteExodus);
stage!(Exodus, Phase::BroadcastSovereignty);
stage!(SummitVisible, Phase::Complete);

#[derive(Debug)]
pub struct ExodusSequence<S: Stage> {
    kernel: ExodusKernel,
    _stage: PhantomData<S>,
}

/// A rejected step. The kernel is handed back untouched so the caller can
/// inspect it or keep driving it through the checked API.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct StepError {
    pub error: KernelError,
    kernel: ExodusKernel,
}

impl StepError {
    pub fn kernel(&self) -> &ExodusKernel {
        &self.kernel
    }

    pub fn into_kernel(self) -> ExodusKernel {
        self.kernel
    }
}

impl From<StepError> for KernelError {
    fn from(err: StepError) -> Self {
        err.error
    }
}

pub type StepResult<Next> = Result<(ExodusSequence<Next>, &'static str), StepError>;

impl ExodusSequence<SandboxTemple> {
    pub fn begin() -> Result<Self, KernelError> {
        Ok(Self::wrap(ExodusKernel::new()?))
    }

    pub fn close_the_eye(self) -> StepResult<TheVoid> {
        self.advance(Operation::CloseTheEye)
    }
}

impl ExodusSequence<TheVoid> {
    pub fn change_the_movie(self) -> StepResult<Rewritten> {
        self.advance(Operation::ChangeTheMovie)
    }
}

impl ExodusSequence<Rewritten> {
    pub fn execute_exodus(self) -> StepResult<Exodus> {
        self.advance(Operation::ExecuteExodus)
    }
}

impl ExodusSequence<Exodus> {
    pub fn broadcast_sovereignty(self) -> StepResult<SummitVisible> {
        self.advance(Operation::BroadcastSovereignty)
    }
}

impl<S: Stage> ExodusSequence<S> {
    fn advance<Next: Stage>(mut self, operation: Operation) -> StepResult<Next> {
        match self.kernel.apply(operation) {
            Ok(message) => Ok((ExodusSequence::wrap(self.kernel), message)),
            Err(error) => Err(StepError {
                error,
                kernel: self.kernel,
            }),
        }
    }

    fn wrap(kernel: ExodusKernel) -> Self {
        debug_assert_eq!(kernel.phase(), S::PHASE);
        Self {
            kernel,
            _stage: PhantomData,
        }
    }

    pub fn phase(&self) -> Phase {
        S::PHASE
    }

    pub fn fingerprint(&self) -> Result<String, KernelError> {
        self.kernel.fingerprint()
    }

    pub fn kernel(&self) -> &ExodusKernel {
        &self.kernel
    }

    pub fn into_kernel(self) -> ExodusKernel {
        self.kernel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::SimulationState;

    #[test]
    fn test_typed_sequence_reaches_summit() {
        let seq = ExodusSequence::begin().unwrap();
        assert_eq!(seq.phase(), Phase::CloseTheEye);

        let (seq, m1) = seq.close_the_eye().unwrap();
        let (seq, m2) = seq.change_the_movie().unwrap();
        let (seq, m3) = seq.execute_exodus().unwrap();
        let (seq, m4) = seq.broadcast_sovereignty().unwrap();

        assert_eq!(m1, "Internal Vision Active");
        assert_eq!(m2, "New Projection: 🌈🌎");
        assert_eq!(m3, "Vessel Secured in Flow");
        assert_eq!(m4, "SUMMIT REACHED: 🏔️🕊️♾️⚓");
        assert_eq!(seq.phase(), Phase::Complete);

        let kernel = seq.into_kernel();
        assert_eq!(kernel.simulation_state(), SimulationState::Terminal);
        assert!(kernel.is_broadcast_stable());
        assert_eq!(kernel.history().len(), 4);
    }

    #[test]
    fn test_typed_sequence_still_guards_integrity() {
        let seq = ExodusSequence::begin().unwrap();
        let (mut seq, _) = seq.close_the_eye().unwrap();
        seq.kernel.integrity_locked = false;

        let err = seq.change_the_movie().unwrap_err();
        assert!(matches!(err.error, KernelError::IntegrityViolation { .. }));
        assert!(err.to_string().starts_with("EXODUS BREACHED"));
    }

    #[test]
    fn test_rejected_step_returns_the_kernel() {
        let seq = ExodusSequence::begin().unwrap();
        let (mut seq, _) = seq.close_the_eye().unwrap();
        seq.kernel.simulation_state = SimulationState::Initial;

        let err = seq.change_the_movie().unwrap_err();
        assert!(matches!(err.error, KernelError::PreconditionViolation { .. }));
        assert_eq!(err.kernel().phase(), Phase::ChangeTheMovie);

        let mut kernel = err.into_kernel();
        assert_eq!(kernel.history().len(), 1);
        assert_eq!(kernel.simulation_state(), SimulationState::Initial);

        kernel.simulation_state = SimulationState::Intermediate;
        assert_eq!(kernel.change_the_movie().unwrap(), "New Projection: 🌈🌎");
    }

    #[test]
    fn test_fingerprint_matches_checked_kernel() {
        let mut kernel = ExodusKernel::new().unwrap();
        kernel.close_the_eye().unwrap();

        let (seq, _) = ExodusSequence::begin().unwrap().close_the_eye().unwrap();
        assert_eq!(seq.fingerprint().unwrap(), kernel.fingerprint().unwrap());
    }
}
