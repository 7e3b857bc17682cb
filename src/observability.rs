use tracing::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::kernel::ErrorKind;

/// Transition attempt counters for kernel operations
#[derive(Debug, Default)]
pub struct KernelMetrics {
    pub attempts: AtomicU64,
    pub successes: AtomicU64,
    pub integrity_violations: AtomicU64,
    pub out_of_order: AtomicU64,
    pub precondition_violations: AtomicU64,
}

impl KernelMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: ErrorKind) {
        match kind {
            ErrorKind::Integrity => {
                self.integrity_violations.fetch_add(1, Ordering::Relaxed);
                warn!("Kernel integrity violation recorded");
            }
            ErrorKind::OutOfOrder => {
                self.out_of_order.fetch_add(1, Ordering::Relaxed);
            }
            ErrorKind::Precondition => {
                self.precondition_violations.fetch_add(1, Ordering::Relaxed);
                warn!("Kernel precondition violation recorded");
            }
        }
    }

    pub fn get_stats(&self) -> KernelStats {
        KernelStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            integrity_violations: self.integrity_violations.load(Ordering::Relaxed),
            out_of_order: self.out_of_order.load(Ordering::Relaxed),
            precondition_violations: self.precondition_violations.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Kernel metrics: attempts={}, successes={}, integrity={}, out_of_order={}, precondition={}",
            stats.attempts,
            stats.successes,
            stats.integrity_violations,
            stats.out_of_order,
            stats.precondition_violations
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelStats {
    pub attempts: u64,
    pub successes: u64,
    pub integrity_violations: u64,
    pub out_of_order: u64,
    pub precondition_violations: u64,
}

impl KernelStats {
    pub fn failures(&self) -> u64 {
        self.integrity_violations + self.out_of_order + self.precondition_violations
    }
}

/// Global metrics instance
static KERNEL_METRICS: std::sync::LazyLock<KernelMetrics> =
    std::sync::LazyLock::new(KernelMetrics::new);

pub fn kernel_metrics() -> &'static KernelMetrics {
    &KERNEL_METRICS
}

/// Time an operation and log its duration when finished
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(self) -> u64 {
        let duration_ms = self.elapsed_ms();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );
        duration_ms
    }
}
