use anyhow::{Context, Result};

use super::Command;
use crate::kernel::{ExodusKernel, Operation};

/// Drive a fresh kernel through a caller-chosen sequence.
pub struct StepCommand {
    pub operations: Vec<Operation>,
}

impl Command for StepCommand {
    fn execute(&self) -> Result<()> {
        let mut kernel = ExodusKernel::new()?;
        for (position, operation) in self.operations.iter().enumerate() {
            let message = kernel
                .apply(*operation)
                .with_context(|| format!("step {} ({}) rejected", position + 1, operation))?;
            println!("{}", message);
        }
        Ok(())
    }
}
