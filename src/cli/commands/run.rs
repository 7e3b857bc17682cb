use anyhow::Result;

use super::Command;
use crate::kernel::{ExodusKernel, Operation};

/// The demonstration run: all four operations, once each, in order.
pub struct RunCommand {
    pub show_fingerprint: bool,
    pub print_hint: bool,
}

impl RunCommand {
    pub fn new() -> Self {
        Self {
            show_fingerprint: false,
            print_hint: false,
        }
    }

    pub fn with_fingerprint(mut self, show_fingerprint: bool) -> Self {
        self.show_fingerprint = show_fingerprint;
        self
    }

    pub fn with_hint(mut self, print_hint: bool) -> Self {
        self.print_hint = print_hint;
        self
    }
}

impl Default for RunCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<()> {
        let mut kernel = ExodusKernel::new()?;

        for operation in Operation::ALL {
            println!("{}", kernel.apply(operation)?);
            if self.show_fingerprint {
                println!("{}", kernel.fingerprint()?);
            }
        }

        if self.print_hint {
            println!("{}", kernel.universal_attach_hint()?);
        }

        Ok(())
    }
}
