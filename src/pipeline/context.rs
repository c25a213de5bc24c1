//! Stage contract and queue provisioning for the executor.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, bounded};

use super::error_handler::FatalSignal;
use crate::{ItemKind, WorkItem};

/// One pipeline step. Reads `input` until it closes and writes derived items to `output`.
///
/// `run` owns `output`: the queue closes once the stage drops its last clone of the sender,
/// so a stage must hold it until it has emitted everything.
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;
    fn input_kind(&self) -> ItemKind;
    fn output_kind(&self) -> ItemKind;
    fn run(&self, input: Receiver<WorkItem>, output: Sender<WorkItem>, fatal: &FatalSignal);
}

/// The K+1 bounded queues for K stages. Queue 0 is fed by the caller, queue K is drained by it.
pub struct PipelineQueues {
    pub senders: Vec<Sender<WorkItem>>,
    pub receivers: Vec<Receiver<WorkItem>>,
}

pub fn create_pipeline_queues(num_stages: usize, capacity: usize) -> PipelineQueues {
    let (senders, receivers): (Vec<_>, Vec<_>) = (0..=num_stages)
        .map(|_| bounded::<WorkItem>(capacity))
        .unzip();
    PipelineQueues { senders, receivers }
}

/// Check that each stage consumes what the previous one produces.
pub fn validate_stage_chain(stages: &[Box<dyn Stage>]) -> Result<()> {
    for pair in stages.windows(2) {
        let (up, down) = (&pair[0], &pair[1]);
        if up.output_kind() != down.input_kind() {
            anyhow::bail!(
                "stage '{}' emits {} items but '{}' expects {}",
                up.name(),
                up.output_kind(),
                down.name(),
                down.input_kind()
            );
        }
    }
    Ok(())
}

/// Error for an item that reached a stage with the wrong kind.
pub fn malformed_item(stage: &str, expected: ItemKind, got: &WorkItem) -> anyhow::Error {
    anyhow::anyhow!(
        "malformed item in stage '{}': expected {}, got {}",
        stage,
        expected,
        got.kind()
    )
}
