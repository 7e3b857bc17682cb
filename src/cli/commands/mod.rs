use anyhow::Result;

use crate::kernel::{ExodusKernel, Operation};

pub mod inspect;
pub mod run;
pub mod step;

pub trait Command {
    fn execute(&self) -> Result<()>;
}

/// Build a fresh kernel and run the first `steps` operations in order.
pub fn kernel_after(steps: u8) -> Result<ExodusKernel> {
    let mut kernel = ExodusKernel::new()?;
    for operation in Operation::ALL.into_iter().take(steps as usize) {
        kernel.apply(operation)?;
    }
    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_after_advances_phase() {
        assert_eq!(kernel_after(0).unwrap().phase_index(), 0);
        assert_eq!(kernel_after(2).unwrap().phase_index(), 2);
        let done = kernel_after(4).unwrap();
        assert!(done.is_complete());
        assert_eq!(done.phase_index(), 3);
    }
}
