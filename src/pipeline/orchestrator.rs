use anyhow::Result;
use crossbeam_channel::Sender;
use log::debug;
use std::sync::Arc;
use std::thread;

use crate::engine::{QuotaGuard, Signer};
use crate::pipeline::{
    CombineStage, DualHashStage, FatalSignal, PipelineQueues, SixWayStage, Stage,
    create_pipeline_queues, malformed_item, validate_stage_chain,
};
use crate::{ItemKind, PipelineOpts, WorkItem};

/// Ordered list of stages wired together by bounded queues.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    queue_capacity: usize,
    input_kind: ItemKind,
    output_kind: ItemKind,
}

impl Pipeline {
    /// Validate the chain (non-empty, adjacent kinds match) and the queue capacity.
    /// Worker pool sizes are checked by each stage's pool when it starts.
    pub fn new(stages: Vec<Box<dyn Stage>>, queue_capacity: usize) -> Result<Self> {
        if queue_capacity == 0 {
            anyhow::bail!("queue capacity must be at least 1");
        }
        let (Some(first), Some(last)) = (stages.first(), stages.last()) else {
            anyhow::bail!("pipeline needs at least one stage");
        };
        let (input_kind, output_kind) = (first.input_kind(), last.output_kind());
        validate_stage_chain(&stages)?;
        Ok(Self {
            stages,
            queue_capacity,
            input_kind,
            output_kind,
        })
    }

    /// Dual-hash → six-way → combine, sharing `signer` and gating the expensive call with `quota`.
    pub fn standard(
        opts: &PipelineOpts,
        signer: Arc<dyn Signer>,
        quota: Arc<QuotaGuard>,
    ) -> Result<Self> {
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(DualHashStage::new(
                Arc::clone(&signer),
                quota,
                opts.dual_hash_workers,
            )),
            Box::new(SixWayStage::new(signer, opts.six_way_workers)),
            Box::new(CombineStage),
        ];
        Self::new(stages, opts.queue_capacity)
    }

    pub fn input_kind(&self) -> ItemKind {
        self.input_kind
    }

    pub fn output_kind(&self) -> ItemKind {
        self.output_kind
    }

    /// Feed `inputs`, run every stage concurrently, and return everything drained from the last queue.
    ///
    /// Returns only after every stage has exited and the last queue is closed and empty. If any stage
    /// fails or panics the drained items are discarded and the first error is returned.
    pub fn run<I>(&self, inputs: I) -> Result<Vec<WorkItem>>
    where
        I: IntoIterator<Item = WorkItem>,
        I::IntoIter: Send,
    {
        let fatal = FatalSignal::new();
        let PipelineQueues { senders, receivers } =
            create_pipeline_queues(self.stages.len(), self.queue_capacity);
        let mut senders = senders.into_iter();
        let mut receivers = receivers.into_iter();
        // Queue 0 belongs to the feeder, queue K to us; stage i gets (rx[i], tx[i+1]).
        let (Some(feed_tx), Some(last_rx)) = (senders.next(), receivers.next_back()) else {
            anyhow::bail!("pipeline queues were not provisioned");
        };
        let wiring: Vec<_> = receivers.zip(senders).collect();
        let inputs = inputs.into_iter();
        let expected = self.input_kind();

        let drained = thread::scope(|scope| {
            let fatal = &fatal;
            let feeder = scope.spawn(move || feed_inputs(inputs, feed_tx, expected, fatal));

            let stage_handles: Vec<_> = self
                .stages
                .iter()
                .zip(wiring)
                .map(|(stage, (input, output))| {
                    let handle = scope.spawn(move || {
                        debug!("stage '{}' started", stage.name());
                        stage.run(input, output, fatal);
                        debug!("stage '{}' finished", stage.name());
                    });
                    (stage.name(), handle)
                })
                .collect();

            let drained: Vec<WorkItem> = last_rx.iter().collect();
            debug!("pipeline: last queue closed, drained {} items", drained.len());

            if feeder.join().is_err() {
                fatal.trip(anyhow::anyhow!("input feeder panicked"));
            }
            for (name, h) in stage_handles {
                if h.join().is_err() {
                    fatal.trip(anyhow::anyhow!("stage '{name}' panicked"));
                }
            }
            drained
        });

        fatal.check()?;
        Ok(drained)
    }
}

/// Push caller items into queue 0, then close it. Stops early once the pipeline is failing.
fn feed_inputs<I>(inputs: I, feed_tx: Sender<WorkItem>, expected: ItemKind, fatal: &FatalSignal)
where
    I: Iterator<Item = WorkItem>,
{
    let mut fed = 0_usize;
    for item in inputs {
        if fatal.is_tripped() {
            break;
        }
        if item.kind() != expected {
            fatal.trip(malformed_item("feeder", expected, &item));
            break;
        }
        if feed_tx.send(item).is_err() {
            break;
        }
        fed += 1;
    }
    debug!("feeder: sent {} items, closing input queue", fed);
    drop(feed_tx);
}
