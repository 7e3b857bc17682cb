use anyhow::Result;
use clap::Parser;

use exodus_kernel::cli::commands::inspect::{FingerprintCommand, HintCommand, ReportCommand};
use exodus_kernel::cli::commands::run::RunCommand;
use exodus_kernel::cli::commands::step::StepCommand;
use exodus_kernel::cli::commands::Command;
use exodus_kernel::cli::{Cli, Commands};
use exodus_kernel::{config, telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::config()?;

    telemetry::init_telemetry(&config.observability)?;
    let correlation_id = telemetry::generate_correlation_id();

    let name = match &cli.command {
        None | Some(Commands::Run { .. }) => "run",
        Some(Commands::Fingerprint { .. }) => "fingerprint",
        Some(Commands::Hint) => "hint",
        Some(Commands::Report { .. }) => "report",
        Some(Commands::Step { .. }) => "step",
    };

    let command: Box<dyn Command> = match cli.command {
        // Default behavior: the demonstration run
        None => Box::new(
            RunCommand::new()
                .with_fingerprint(config.demo.show_fingerprint)
                .with_hint(config.demo.print_hint),
        ),
        Some(Commands::Run { show_fingerprint }) => Box::new(
            RunCommand::new()
                .with_fingerprint(show_fingerprint || config.demo.show_fingerprint)
                .with_hint(config.demo.print_hint),
        ),
        Some(Commands::Fingerprint { after }) => Box::new(FingerprintCommand { after }),
        Some(Commands::Hint) => Box::new(HintCommand),
        Some(Commands::Report { after, format }) => Box::new(ReportCommand { after, format }),
        Some(Commands::Step { operations }) => Box::new(StepCommand { operations }),
    };

    let span = telemetry::create_run_span(name, &correlation_id);
    let result = span.in_scope(|| command.execute());

    if config.observability.metrics_enabled {
        exodus_kernel::kernel_metrics().log_stats();
    }
    telemetry::shutdown_telemetry();

    result
}
