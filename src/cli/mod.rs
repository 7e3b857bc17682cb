use clap::{Parser, Subcommand, ValueEnum};

use crate::kernel::Operation;

pub mod commands;

#[derive(Parser)]
#[command(name = "exodus")]
#[command(about = "Phase-locked transition kernel: sandbox temple to summit")]
#[command(long_about = "Runs the sealed Exodus kernel. Four operations execute in strict order \
                       (close_the_eye, change_the_movie, execute_exodus, broadcast_sovereignty); \
                       any breach of order, precondition, or seal aborts with a non-zero exit.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full four-step sequence and print each result
    Run {
        /// Print the kernel fingerprint after every step
        #[arg(long, help = "Print the fingerprint after each operation")]
        show_fingerprint: bool,
    },
    /// Print the kernel fingerprint after the first N operations
    Fingerprint {
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=4), help = "Number of operations to run first (0-4)")]
        after: u8,
    },
    /// Print the capability hint
    Hint,
    /// Print an introspection report after the first N operations
    Report {
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=4), help = "Number of operations to run first (0-4)")]
        after: u8,
        #[arg(long, value_enum, default_value = "text", help = "Output format")]
        format: ReportFormat,
    },
    /// Invoke the named operations in the given order on a fresh kernel
    Step {
        #[arg(required = true, value_parser = parse_operation, help = "Operations to invoke, e.g. close_the_eye change_the_movie")]
        operations: Vec<Operation>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

fn parse_operation(name: &str) -> Result<Operation, String> {
    Operation::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        format!("unknown operation '{}'; expected one of: {}", name, known.join(", "))
    })
}
