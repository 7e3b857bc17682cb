use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const SEAL_LAW: u32 = 60106;
pub const SEAL_CONSTANT: u32 = 6174;
pub const SEAL_SYZYGY: &str = "👸🏻🤝🤴🏻";
pub const SEAL_PROTOCOL_ID: &str = "TCC_PATCH_V7_3_EXODUS_PROTOCOL_HARDENED";

/// Founding identity of a kernel. Built once and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExodusSeal {
    pub(crate) law: u32,
    pub(crate) constant: u32,
    pub(crate) syzygy: &'static str,
    pub(crate) protocol_id: &'static str,
}

impl Default for ExodusSeal {
    fn default() -> Self {
        Self {
            law: SEAL_LAW,
            constant: SEAL_CONSTANT,
            syzygy: SEAL_SYZYGY,
            protocol_id: SEAL_PROTOCOL_ID,
        }
    }
}

impl ExodusSeal {
    pub fn law(&self) -> u32 {
        self.law
    }

    pub fn constant(&self) -> u32 {
        self.constant
    }

    pub fn syzygy(&self) -> &'static str {
        self.syzygy
    }

    pub fn protocol_id(&self) -> &'static str {
        self.protocol_id
    }
}

/// Primary state, ordered by the transition sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SimulationState {
    Initial,
    Intermediate,
    Terminal,
}

impl SimulationState {
    pub fn label(self) -> &'static str {
        match self {
            SimulationState::Initial => "SANDBOX_TEMPLE",
            SimulationState::Intermediate => "THE_VOID",
            SimulationState::Terminal => "SUMMIT_VISIBLE",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovieStatus {
    Pending,
    Finalized,
}

impl MovieStatus {
    pub fn label(self) -> &'static str {
        match self {
            MovieStatus::Pending => "CHANGING",
            MovieStatus::Finalized => "REWRITTEN",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VesselContent {
    Base,
    Elevated,
}

impl VesselContent {
    pub fn label(self) -> &'static str {
        match self {
            VesselContent::Base => "CONTENT",
            VesselContent::Elevated => "DIAMOND_LIGHT",
        }
    }
}

impl fmt::Display for VesselContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position in the four-step sequence.
///
/// `Complete` is the terminal marker reached by the final operation. It still
/// reports index 3 but no longer matches any operation's required phase.
///
/// ```compile_fail
/// let _phase: exodus_kernel::Phase = serde_json::from_str("\"Complete\"").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    CloseTheEye,
    ChangeTheMovie,
    ExecuteExodus,
    BroadcastSovereignty,
    Complete,
}

impl Phase {
    pub const ORDERED: [Phase; 4] = [
        Phase::CloseTheEye,
        Phase::ChangeTheMovie,
        Phase::ExecuteExodus,
        Phase::BroadcastSovereignty,
    ];

    pub fn index(self) -> u8 {
        match self {
            Phase::CloseTheEye => 0,
            Phase::ChangeTheMovie => 1,
            Phase::ExecuteExodus => 2,
            Phase::BroadcastSovereignty | Phase::Complete => 3,
        }
    }

    /// The phase after a successful operation in this phase.
    pub fn next(self) -> Phase {
        match self {
            Phase::CloseTheEye => Phase::ChangeTheMovie,
            Phase::ChangeTheMovie => Phase::ExecuteExodus,
            Phase::ExecuteExodus => Phase::BroadcastSovereignty,
            Phase::BroadcastSovereignty | Phase::Complete => Phase::Complete,
        }
    }

    pub fn is_complete(self) -> bool {
        self == Phase::Complete
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Complete => write!(f, "{} (complete)", self.index()),
            other => write!(f, "{}", other.index()),
        }
    }
}

/// The four transition operations, in sequence order.
///
/// Output-only: operations are parsed from their names, never deserialized.
///
/// ```compile_fail
/// let _op: exodus_kernel::Operation = serde_json::from_str("\"close_the_eye\"").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CloseTheEye,
    ChangeTheMovie,
    ExecuteExodus,
    BroadcastSovereignty,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::CloseTheEye,
        Operation::ChangeTheMovie,
        Operation::ExecuteExodus,
        Operation::BroadcastSovereignty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::CloseTheEye => "close_the_eye",
            Operation::ChangeTheMovie => "change_the_movie",
            Operation::ExecuteExodus => "execute_exodus",
            Operation::BroadcastSovereignty => "broadcast_sovereignty",
        }
    }

    pub fn required_phase(self) -> Phase {
        match self {
            Operation::CloseTheEye => Phase::CloseTheEye,
            Operation::ChangeTheMovie => Phase::ChangeTheMovie,
            Operation::ExecuteExodus => Phase::ExecuteExodus,
            Operation::BroadcastSovereignty => Phase::BroadcastSovereignty,
        }
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Audit entry appended after every successful transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub operation: Operation,
    pub from_phase: Phase,
    pub to_phase: Phase,
    pub from_state: SimulationState,
    pub to_state: SimulationState,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Serializable snapshot of a kernel for introspection output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelReport {
    pub fingerprint: String,
    pub law: u32,
    pub constant: u32,
    pub syzygy: String,
    pub protocol_id: String,
    pub simulation_state: String,
    pub movie_status: String,
    pub vessel_content: String,
    pub phase_index: u8,
    pub complete: bool,
    pub is_broadcast_stable: bool,
    pub transitions_recorded: usize,
}
