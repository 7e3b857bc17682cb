// Exodus Kernel - Phase-Locked Transition Organ
//
// One sealed kernel, four ordered operations. Every call runs the integrity
// guard, then the phase gate, then its own precondition before mutating.

pub mod types;
pub mod errors;
pub mod state_machine;
pub mod typestate;
pub mod shared;


pub use types::{
    ExodusSeal, KernelReport, MovieStatus, Operation, Phase, SimulationState, TransitionRecord,
    VesselContent,
};
pub use errors::{ErrorKind, KernelError};
pub use state_machine::{ExodusKernel, UNIVERSAL_ATTACH_HINT};
pub use typestate::{ExodusSequence, StepError};
pub use shared::SharedKernel;
