use anyhow::Result;

use super::{kernel_after, Command};
use crate::cli::ReportFormat;
use crate::kernel::{ExodusKernel, KernelReport};

pub struct FingerprintCommand {
    pub after: u8,
}

impl Command for FingerprintCommand {
    fn execute(&self) -> Result<()> {
        let kernel = kernel_after(self.after)?;
        println!("{}", kernel.fingerprint()?);
        Ok(())
    }
}

pub struct HintCommand;

impl Command for HintCommand {
    fn execute(&self) -> Result<()> {
        let kernel = ExodusKernel::new()?;
        println!("{}", kernel.universal_attach_hint()?);
        Ok(())
    }
}

pub struct ReportCommand {
    pub after: u8,
    pub format: ReportFormat,
}

impl Command for ReportCommand {
    fn execute(&self) -> Result<()> {
        let report = kernel_after(self.after)?.report()?;
        match self.format {
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            ReportFormat::Text => print!("{}", render_text(&report)),
        }
        Ok(())
    }
}

fn render_text(report: &KernelReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("fingerprint:      {}\n", report.fingerprint));
    out.push_str(&format!("seal:             law={} constant={} syzygy={}\n", report.law, report.constant, report.syzygy));
    out.push_str(&format!("simulation_state: {}\n", report.simulation_state));
    out.push_str(&format!("movie_status:     {}\n", report.movie_status));
    out.push_str(&format!("vessel_content:   {}\n", report.vessel_content));
    out.push_str(&format!(
        "phase_index:      {}{}\n",
        report.phase_index,
        if report.complete { " (complete)" } else { "" }
    ));
    out.push_str(&format!("broadcast_stable: {}\n", report.is_broadcast_stable));
    out.push_str(&format!("transitions:      {}\n", report.transitions_recorded));
    out
}
