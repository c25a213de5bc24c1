//! Quota guard: allows one in-flight expensive signer call at a time.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Mutual-exclusion gate around the expensive hash. Inject an `Arc<QuotaGuard>` into the stage
/// that needs it; [`QuotaGuard::global`] is the process-wide default.
#[derive(Debug, Default)]
pub struct QuotaGuard {
    lock: Mutex<()>,
}

/// Held while the protected call runs. Dropping it releases the guard.
pub struct QuotaPermit<'a> {
    _guard: MutexGuard<'a, ()>,
}

static GLOBAL_QUOTA: OnceLock<Arc<QuotaGuard>> = OnceLock::new();

impl QuotaGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide guard shared by every pipeline that doesn't bring its own.
    pub fn global() -> Arc<QuotaGuard> {
        Arc::clone(GLOBAL_QUOTA.get_or_init(|| Arc::new(QuotaGuard::new())))
    }

    /// Block until no other caller holds the guard.
    /// A panic in a previous holder poisons nothing we care about: the mutex guards `()`.
    pub fn acquire(&self) -> QuotaPermit<'_> {
        QuotaPermit {
            _guard: self.lock.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Run `f` while holding the guard; released on return, error or panic.
    pub fn with_permit<T>(&self, f: impl FnOnce() -> T) -> T {
        let _permit = self.acquire();
        f()
    }
}
