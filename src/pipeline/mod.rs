//! Pipeline components: stage contract, queues, worker pool, executor and the hashing stages.

pub mod combine;
pub mod context;
pub mod dual_hash;
pub mod error_handler;
pub mod orchestrator;
pub mod six_way;
pub mod workers;

pub use combine::{CombineStage, sort_and_join};
pub use context::{
    PipelineQueues, Stage, create_pipeline_queues, malformed_item, validate_stage_chain,
};
pub use dual_hash::DualHashStage;
pub use error_handler::FatalSignal;
pub use orchestrator::Pipeline;
pub use six_way::SixWayStage;
pub use workers::run_worker_pool;
