//! Six-way stage: cheap hashes of `"0"+s` .. `"5"+s`, concatenated in index order.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::context::{Stage, malformed_item};
use super::error_handler::FatalSignal;
use super::workers::run_worker_pool;
use crate::engine::Signer;
use crate::utils::config::SIX_WAY_FANOUT;
use crate::{ItemKind, WorkItem};

pub struct SixWayStage {
    signer: Arc<dyn Signer>,
    workers: usize,
}

impl SixWayStage {
    pub fn new(signer: Arc<dyn Signer>, workers: usize) -> Self {
        Self { signer, workers }
    }

    /// Spawn one sub-task per prefix and write each result into its own slot.
    /// Slots are filled by index after the join, so completion order never leaks into the output.
    pub fn sign(&self, data: &str) -> Result<String> {
        let slots: Vec<String> = thread::scope(|scope| {
            let handles: Vec<_> = (0..SIX_WAY_FANOUT)
                .map(|i| scope.spawn(move || self.signer.cheap_hash(&format!("{i}{data}"))))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(i, h)| -> Result<String> {
                    h.join()
                        .map_err(|_| anyhow::anyhow!("six-way sub-task {i} panicked"))?
                })
                .collect::<Result<Vec<_>>>()
        })?;
        Ok(slots.concat())
    }
}

impl Stage for SixWayStage {
    fn name(&self) -> &'static str {
        "six-way"
    }

    fn input_kind(&self) -> ItemKind {
        ItemKind::DualHash
    }

    fn output_kind(&self) -> ItemKind {
        ItemKind::SixWay
    }

    fn run(&self, input: Receiver<WorkItem>, output: Sender<WorkItem>, fatal: &FatalSignal) {
        run_worker_pool(self.name(), self.workers, input, output, fatal, |item| {
            match item {
                WorkItem::DualHash(s) => self.sign(&s).map(WorkItem::SixWay),
                other => Err(malformed_item(self.name(), ItemKind::DualHash, &other)),
            }
        });
    }
}
