//! Combine stage: barrier that sorts every upstream string and joins them with `_`.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use rayon::prelude::*;

use super::context::{Stage, malformed_item};
use super::error_handler::FatalSignal;
use crate::utils::config::COMBINE_SEPARATOR;
use crate::{ItemKind, WorkItem};

pub struct CombineStage;

/// Sort byte-wise ascending and join. Equal strings are indistinguishable, so an unstable sort
/// gives the same result for any input order.
pub fn sort_and_join(mut parts: Vec<String>) -> String {
    parts.par_sort_unstable();
    parts.join(COMBINE_SEPARATOR)
}

impl Stage for CombineStage {
    fn name(&self) -> &'static str {
        "combine"
    }

    fn input_kind(&self) -> ItemKind {
        ItemKind::SixWay
    }

    fn output_kind(&self) -> ItemKind {
        ItemKind::Combined
    }

    fn run(&self, input: Receiver<WorkItem>, output: Sender<WorkItem>, fatal: &FatalSignal) {
        let mut parts = Vec::new();
        for item in input.iter() {
            match item {
                WorkItem::SixWay(s) => parts.push(s),
                other => {
                    fatal.trip(malformed_item(self.name(), ItemKind::SixWay, &other));
                    return;
                }
            }
        }
        if fatal.is_tripped() {
            return;
        }
        debug!("combine: upstream closed after {} items", parts.len());
        if output.send(WorkItem::Combined(sort_and_join(parts))).is_err() {
            debug!("combine: output queue disconnected, result dropped");
        }
    }
}
