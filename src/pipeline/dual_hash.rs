//! Dual-hash stage: `cheap(x) ~ cheap(expensive(x))` for every integer `x`.

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::context::{Stage, malformed_item};
use super::error_handler::FatalSignal;
use super::workers::run_worker_pool;
use crate::engine::{QuotaGuard, Signer};
use crate::utils::config::DUAL_HASH_SEPARATOR;
use crate::{ItemKind, WorkItem};

pub struct DualHashStage {
    signer: Arc<dyn Signer>,
    quota: Arc<QuotaGuard>,
    workers: usize,
}

impl DualHashStage {
    pub fn new(signer: Arc<dyn Signer>, quota: Arc<QuotaGuard>, workers: usize) -> Self {
        Self {
            signer,
            quota,
            workers,
        }
    }

    /// Both branches for one integer. Branch A runs on a scoped thread while this worker
    /// runs branch B; the scope joins A before the halves are combined.
    pub fn sign(&self, x: i64) -> Result<String> {
        let data = x.to_string();
        let (a, b) = thread::scope(|scope| {
            let branch_a = scope.spawn(|| self.signer.cheap_hash(&data));
            let b = self.expensive_then_cheap(&data);
            let a = branch_a
                .join()
                .map_err(|_| anyhow::anyhow!("cheap hash branch panicked for {x}"))?;
            Ok::<_, anyhow::Error>((a?, b?))
        })?;
        Ok(format!("{a}{DUAL_HASH_SEPARATOR}{b}"))
    }

    fn expensive_then_cheap(&self, data: &str) -> Result<String> {
        let expensive = self
            .quota
            .with_permit(|| self.signer.expensive_hash(data))
            .with_context(|| format!("expensive hash of {data}"))?;
        self.signer.cheap_hash(&expensive)
    }
}

impl Stage for DualHashStage {
    fn name(&self) -> &'static str {
        "dual-hash"
    }

    fn input_kind(&self) -> ItemKind {
        ItemKind::Raw
    }

    fn output_kind(&self) -> ItemKind {
        ItemKind::DualHash
    }

    fn run(&self, input: Receiver<WorkItem>, output: Sender<WorkItem>, fatal: &FatalSignal) {
        run_worker_pool(self.name(), self.workers, input, output, fatal, |item| {
            match item {
                WorkItem::Raw(x) => self.sign(x).map(WorkItem::DualHash),
                other => Err(malformed_item(self.name(), ItemKind::Raw, &other)),
            }
        });
    }
}
