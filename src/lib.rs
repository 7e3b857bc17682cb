// Exodus Kernel Library - Phase-Locked Transition Organ
// This exposes the kernel and its ambient stack for embedding and testing

pub mod kernel;
pub mod cli;
pub mod config;
pub mod observability;
pub mod telemetry;

// Re-export key types for easy access
pub use kernel::{
    ErrorKind, ExodusKernel, ExodusSeal, ExodusSequence, KernelError, KernelReport, MovieStatus,
    Operation, Phase, SharedKernel, SimulationState, StepError, TransitionRecord, VesselContent,
};
pub use config::{config, ExodusConfig};
pub use observability::{kernel_metrics, KernelMetrics, KernelStats, OperationTimer};
pub use telemetry::{create_run_span, generate_correlation_id, init_telemetry, shutdown_telemetry};
