use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// First fatal error of a pipeline run, shared by the feeder, every stage and every worker.
///
/// Tripping it is the cancellation broadcast: workers poll [`FatalSignal::is_tripped`] between
/// items and stop, dropping their queue ends so neighbours see disconnects and stop too.
#[derive(Clone, Default)]
pub struct FatalSignal {
    tripped: Arc<AtomicBool>,
    first_error: Arc<Mutex<Option<anyhow::Error>>>,
}

impl FatalSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `err` unless an earlier error is already stored. Later errors are logged and dropped.
    pub fn trip(&self, err: anyhow::Error) {
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            None => {
                log::debug!("pipeline fatal: {err:#}");
                *slot = Some(err);
            }
            Some(_) => log::debug!("pipeline fatal (suppressed, already failing): {err:#}"),
        }
        self.tripped.store(true, Ordering::Release);
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Ok if nothing tripped; otherwise the first recorded error. Call after every stage joined.
    pub fn check(&self) -> Result<()> {
        let taken = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match taken {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
