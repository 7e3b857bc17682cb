use std::sync::{Arc, Mutex, MutexGuard};

use super::errors::KernelError;
use super::state_machine::ExodusKernel;
use super::types::{KernelReport, Operation, Phase};

/// A kernel behind one exclusive lock.
///
/// Each call holds the lock across the whole check-then-act sequence, so two
/// threads can never both pass the phase gate for the same step.
#[derive(Debug, Clone)]
pub struct SharedKernel {
    inner: Arc<Mutex<ExodusKernel>>,
}

impl SharedKernel {
    pub fn new() -> Result<Self, KernelError> {
        Ok(Self::from_kernel(ExodusKernel::new()?))
    }

    pub fn from_kernel(kernel: ExodusKernel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(kernel)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ExodusKernel>, KernelError> {
        self.inner
            .lock()
            .map_err(|_| KernelError::integrity("kernel lock poisoned; state may be torn"))
    }

    pub fn apply(&self, operation: Operation) -> Result<&'static str, KernelError> {
        self.lock()?.apply(operation)
    }

    pub fn close_the_eye(&self) -> Result<&'static str, KernelError> {
        self.apply(Operation::CloseTheEye)
    }

    pub fn change_the_movie(&self) -> Result<&'static str, KernelError> {
        self.apply(Operation::ChangeTheMovie)
    }

    pub fn execute_exodus(&self) -> Result<&'static str, KernelError> {
        self.apply(Operation::ExecuteExodus)
    }

    pub fn broadcast_sovereignty(&self) -> Result<&'static str, KernelError> {
        self.apply(Operation::BroadcastSovereignty)
    }

    pub fn fingerprint(&self) -> Result<String, KernelError> {
        self.lock()?.fingerprint()
    }

    pub fn universal_attach_hint(&self) -> Result<&'static str, KernelError> {
        self.lock()?.universal_attach_hint()
    }

    pub fn report(&self) -> Result<KernelReport, KernelError> {
        self.lock()?.report()
    }

    pub fn phase(&self) -> Result<Phase, KernelError> {
        Ok(self.lock()?.phase())
    }

    /// Run `f` with exclusive access to the kernel.
    pub fn with_kernel<R>(&self, f: impl FnOnce(&mut ExodusKernel) -> R) -> Result<R, KernelError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisoned_lock_is_an_integrity_violation() {
        let shared = SharedKernel::new().unwrap();
        let clone = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.inner.lock().unwrap();
            panic!("poison the kernel lock");
        })
        .join();

        let err = shared.close_the_eye().unwrap_err();
        assert!(matches!(err, KernelError::IntegrityViolation { .. }));
    }

    #[test]
    fn test_with_kernel_sees_same_state() {
        let shared = SharedKernel::new().unwrap();
        shared.close_the_eye().unwrap();
        let phase = shared.with_kernel(|k| k.phase()).unwrap();
        assert_eq!(phase, Phase::ChangeTheMovie);
    }
}
