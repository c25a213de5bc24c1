//! Public and internal types for the signflow API and pipeline.

use std::fmt;

use crate::utils::config::PipelineDefaults;

/// Kind of [`WorkItem`] a stage consumes or produces. Used to type-check the stage chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Raw,
    DualHash,
    SixWay,
    Combined,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Raw => "raw",
            ItemKind::DualHash => "dual-hash",
            ItemKind::SixWay => "six-way",
            ItemKind::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// One value flowing between stages. Items are never mutated after they are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkItem {
    /// Integer fed by the caller.
    Raw(i64),
    /// `cheap~cheap(expensive)` for one integer.
    DualHash(String),
    /// Six cheap hashes concatenated in index order.
    SixWay(String),
    /// Sorted, underscore-joined result of the whole run.
    Combined(String),
}

impl WorkItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            WorkItem::Raw(_) => ItemKind::Raw,
            WorkItem::DualHash(_) => ItemKind::DualHash,
            WorkItem::SixWay(_) => ItemKind::SixWay,
            WorkItem::Combined(_) => ItemKind::Combined,
        }
    }
}

/// Lib options for [`sign_numbers`](crate::sign_numbers).
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    /// Capacity of every inter-stage queue (backpressure threshold).
    pub queue_capacity: usize,
    /// Worker pool size of the dual-hash stage.
    pub dual_hash_workers: usize,
    /// Worker pool size of the six-way stage.
    pub six_way_workers: usize,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            queue_capacity: PipelineDefaults::QUEUE_CAPACITY,
            dual_hash_workers: PipelineDefaults::DUAL_HASH_WORKERS,
            six_way_workers: PipelineDefaults::SIX_WAY_WORKERS,
        }
    }
}

/// Full options (CLI). Use [`PipelineOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub pipeline: PipelineOpts,
    /// Salt appended to every signer input.
    pub salt: String,
    /// Sleep inside the signer like the real collaborator does.
    pub simulate_latency: bool,
    /// Debug logging and progress counter.
    pub verbose: bool,
}
