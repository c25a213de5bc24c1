use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::thread;

use super::error_handler::FatalSignal;
use crate::WorkItem;

/// Single worker: take one item, process it fully (including its own fan-out), emit, repeat.
/// Stops on input close, output disconnect, or a tripped fatal signal.
fn worker_loop<F>(
    input: Receiver<WorkItem>,
    output: Sender<WorkItem>,
    fatal: &FatalSignal,
    per_item: &F,
) where
    F: Fn(WorkItem) -> Result<WorkItem> + Sync,
{
    while !fatal.is_tripped() {
        let Ok(item) = input.recv() else {
            break;
        };
        match per_item(item) {
            Ok(out) => {
                if output.send(out).is_err() {
                    break;
                }
            }
            Err(e) => {
                fatal.trip(e);
                break;
            }
        }
    }
}

/// Run `workers` threads draining `input` into `output`, and return once all of them exit.
/// `input` and `output` are consumed so the queue ends close as soon as the last worker stops.
pub fn run_worker_pool<F>(
    stage: &str,
    workers: usize,
    input: Receiver<WorkItem>,
    output: Sender<WorkItem>,
    fatal: &FatalSignal,
    per_item: F,
) where
    F: Fn(WorkItem) -> Result<WorkItem> + Sync,
{
    if workers == 0 {
        fatal.trip(anyhow::anyhow!("stage '{stage}' has an empty worker pool"));
        return;
    }
    let per_item = &per_item;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let input = input.clone();
                let output = output.clone();
                scope.spawn(move || worker_loop(input, output, fatal, per_item))
            })
            .collect();
        // Only the workers hold queue ends now.
        drop(input);
        drop(output);
        for (i, h) in handles.into_iter().enumerate() {
            if h.join().is_err() {
                fatal.trip(anyhow::anyhow!("stage '{stage}' worker {i} panicked"));
            }
        }
    });
}
