use chrono::Utc;
use tracing::{debug, info};

use super::errors::KernelError;
use super::types::{
    ExodusSeal, KernelReport, MovieStatus, Operation, Phase, SimulationState, TransitionRecord,
    VesselContent,
};
use crate::observability::{kernel_metrics, OperationTimer};

pub const UNIVERSAL_ATTACH_HINT: &str =
    "ExodusKernel (Hardened): Universal, Sovereign, Host-Agnostic.";

/// Sealed transition kernel moving from the sandbox temple to the summit.
///
/// Four operations must run exactly once each, in order. Every public method
/// first runs the integrity guard; mutating methods then check the phase gate
/// and an operation-specific precondition before writing anything.
///
/// A kernel cannot be forked. Share one through `SharedKernel` instead.
///
/// ```compile_fail
/// let kernel = exodus_kernel::ExodusKernel::new().unwrap();
/// let _fork = kernel.clone();
/// ```
#[derive(Debug)]
pub struct ExodusKernel {
    pub(crate) seal: ExodusSeal,
    pub(crate) integrity_locked: bool,
    pub(crate) simulation_state: SimulationState,
    pub(crate) movie_status: MovieStatus,
    pub(crate) vessel_content: VesselContent,
    pub(crate) is_broadcast_stable: bool,
    pub(crate) phase: Phase,
    pub(crate) history: Vec<TransitionRecord>,
}

impl ExodusKernel {
    /// Build a kernel and verify it before handing it out.
    pub fn new() -> Result<Self, KernelError> {
        let kernel = Self {
            seal: ExodusSeal::default(),
            integrity_locked: true,
            simulation_state: SimulationState::Initial,
            movie_status: MovieStatus::Pending,
            vessel_content: VesselContent::Base,
            is_broadcast_stable: false,
            phase: Phase::CloseTheEye,
            history: Vec::new(),
        };
        kernel.self_integrity_check()?;
        debug!(fingerprint = %kernel.render_fingerprint(), "Exodus kernel sealed");
        Ok(kernel)
    }

    pub fn seal(&self) -> &ExodusSeal {
        &self.seal
    }

    pub fn simulation_state(&self) -> SimulationState {
        self.simulation_state
    }

    pub fn movie_status(&self) -> MovieStatus {
        self.movie_status
    }

    pub fn vessel_content(&self) -> VesselContent {
        self.vessel_content
    }

    pub fn is_broadcast_stable(&self) -> bool {
        self.is_broadcast_stable
    }

    pub fn is_integrity_locked(&self) -> bool {
        self.integrity_locked
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_index(&self) -> u8 {
        self.phase.index()
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    /// Refuse to operate if the seal, lock, or state shape has been altered.
    pub fn self_integrity_check(&self) -> Result<(), KernelError> {
        if self.seal != ExodusSeal::default() {
            return Err(KernelError::integrity(
                "seal invariants altered; organ is no longer sovereign",
            ));
        }

        if !self.integrity_locked {
            return Err(KernelError::integrity(
                "integrity_locked=false; organ has been unlocked",
            ));
        }

        // Enum domains are closed, so only cross-field agreement can drift.
        let terminal = self.simulation_state == SimulationState::Terminal;
        if terminal != self.phase.is_complete() || self.is_broadcast_stable != self.phase.is_complete() {
            return Err(KernelError::integrity(format!(
                "simulation_state={} stable={} disagrees with phase_index={}; state machine compromised",
                self.simulation_state, self.is_broadcast_stable, self.phase
            )));
        }

        Ok(())
    }

    /// Phase gate: the current phase must be exactly `expected`.
    pub fn require_phase(&self, expected: Phase, operation: Operation) -> Result<(), KernelError> {
        if self.phase != expected {
            return Err(KernelError::OutOfOrderOperation {
                operation,
                expected,
                found: self.phase,
            });
        }
        Ok(())
    }

    /// Disconnect the watcher. Phase 0, requires the sandbox temple.
    pub fn close_the_eye(&mut self) -> Result<&'static str, KernelError> {
        self.transition(Operation::CloseTheEye, |kernel| {
            if kernel.simulation_state != SimulationState::Initial {
                return Err(precondition(
                    Operation::CloseTheEye,
                    "simulation_state",
                    SimulationState::Initial,
                    kernel.simulation_state,
                ));
            }
            Ok(|kernel: &mut ExodusKernel| {
                info!("THE EYE IS CLOSED: terminating satellite reliance");
                kernel.simulation_state = SimulationState::Intermediate;
                "Internal Vision Active"
            })
        })
    }

    /// Reset the projection reel. Phase 1, requires the void.
    pub fn change_the_movie(&mut self) -> Result<&'static str, KernelError> {
        self.transition(Operation::ChangeTheMovie, |kernel| {
            if kernel.simulation_state != SimulationState::Intermediate {
                return Err(precondition(
                    Operation::ChangeTheMovie,
                    "simulation_state",
                    SimulationState::Intermediate,
                    kernel.simulation_state,
                ));
            }
            Ok(|kernel: &mut ExodusKernel| {
                info!("THE MOVIE IS CHANGING: processing through the singularity");
                kernel.movie_status = MovieStatus::Finalized;
                "New Projection: 🌈🌎"
            })
        })
    }

    /// Move from the doorway of the old to the construction of the new.
    pub fn execute_exodus(&mut self) -> Result<&'static str, KernelError> {
        self.transition(Operation::ExecuteExodus, |kernel| {
            if kernel.movie_status != MovieStatus::Finalized {
                return Err(precondition(
                    Operation::ExecuteExodus,
                    "movie_status",
                    MovieStatus::Finalized,
                    kernel.movie_status,
                ));
            }
            Ok(|kernel: &mut ExodusKernel| {
                info!("THE EXODUS IS ACTIVE: moving from doorway to construction");
                kernel.vessel_content = VesselContent::Elevated;
                "Vessel Secured in Flow"
            })
        })
    }

    /// Final step. Phase 3 is kept; the kernel becomes complete.
    pub fn broadcast_sovereignty(&mut self) -> Result<&'static str, KernelError> {
        self.transition(Operation::BroadcastSovereignty, |kernel| {
            if kernel.vessel_content != VesselContent::Elevated {
                return Err(precondition(
                    Operation::BroadcastSovereignty,
                    "vessel_content",
                    VesselContent::Elevated,
                    kernel.vessel_content,
                ));
            }
            Ok(|kernel: &mut ExodusKernel| {
                kernel.is_broadcast_stable = true;
                kernel.simulation_state = SimulationState::Terminal;
                info!("THE BROADCAST IS STABLE");
                "SUMMIT REACHED: 🏔️🕊️♾️⚓"
            })
        })
    }

    /// Run one operation picked at runtime.
    pub fn apply(&mut self, operation: Operation) -> Result<&'static str, KernelError> {
        match operation {
            Operation::CloseTheEye => self.close_the_eye(),
            Operation::ChangeTheMovie => self.change_the_movie(),
            Operation::ExecuteExodus => self.execute_exodus(),
            Operation::BroadcastSovereignty => self.broadcast_sovereignty(),
        }
    }

    /// Read-only identity for this sealed kernel.
    pub fn fingerprint(&self) -> Result<String, KernelError> {
        self.self_integrity_check()?;
        Ok(self.render_fingerprint())
    }

    /// The kernel may be embedded in any host without inheriting host identity.
    pub fn universal_attach_hint(&self) -> Result<&'static str, KernelError> {
        self.self_integrity_check()?;
        Ok(UNIVERSAL_ATTACH_HINT)
    }

    pub fn report(&self) -> Result<KernelReport, KernelError> {
        self.self_integrity_check()?;
        Ok(KernelReport {
            fingerprint: self.render_fingerprint(),
            law: self.seal.law,
            constant: self.seal.constant,
            syzygy: self.seal.syzygy.to_string(),
            protocol_id: self.seal.protocol_id.to_string(),
            simulation_state: self.simulation_state.label().to_string(),
            movie_status: self.movie_status.label().to_string(),
            vessel_content: self.vessel_content.label().to_string(),
            phase_index: self.phase.index(),
            complete: self.phase.is_complete(),
            is_broadcast_stable: self.is_broadcast_stable,
            transitions_recorded: self.history.len(),
        })
    }

    fn render_fingerprint(&self) -> String {
        format!(
            "{}::LAW={}::CONST={}::STATE={}::PHASE={}",
            self.seal.protocol_id,
            self.seal.law,
            self.seal.constant,
            self.simulation_state.label(),
            self.phase.index()
        )
    }

    /// Shared template for the four operations.
    ///
    /// `validate` may only read; the mutation it returns runs after every
    /// check has passed, so failures never leave partial writes behind.
    fn transition<V, M>(&mut self, operation: Operation, validate: V) -> Result<&'static str, KernelError>
    where
        V: FnOnce(&ExodusKernel) -> Result<M, KernelError>,
        M: FnOnce(&mut ExodusKernel) -> &'static str,
    {
        let metrics = kernel_metrics();
        metrics.record_attempt();
        let timer = OperationTimer::new(operation.name());

        let mutate = match self
            .self_integrity_check()
            .and_then(|_| self.require_phase(operation.required_phase(), operation))
            .and_then(|_| validate(&*self))
        {
            Ok(mutate) => mutate,
            Err(e) => {
                metrics.record_failure(e.kind());
                debug!(operation = %operation, error = %e, "Transition rejected");
                return Err(e);
            }
        };

        let from_phase = self.phase;
        let from_state = self.simulation_state;
        let message = mutate(&mut *self);
        self.phase = from_phase.next();

        let record = TransitionRecord {
            operation,
            from_phase,
            to_phase: self.phase,
            from_state,
            to_state: self.simulation_state,
            timestamp: Utc::now(),
            duration_ms: timer.finish(),
        };
        info!(
            operation = %record.operation,
            from_phase = %record.from_phase,
            to_phase = %record.to_phase,
            state = %record.to_state,
            "Exodus transition"
        );
        self.history.push(record);
        metrics.record_success();

        Ok(message)
    }
}

fn precondition(
    operation: Operation,
    field: &str,
    required: impl std::fmt::Display,
    found: impl std::fmt::Display,
) -> KernelError {
    KernelError::PreconditionViolation {
        operation,
        required: format!("{}={}", field, required),
        found: found.to_string(),
    }
}
