//! Signflow: bounded-concurrency multi-stage hashing pipeline.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::sync::Arc;

use engine::{QuotaGuard, Signer};
use pipeline::Pipeline;

/// Result alias used by public signflow API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: sign `inputs` through dual-hash → six-way → combine and return the
/// combined string. Gates the expensive hash with the process-wide [`QuotaGuard::global`].
///
/// Either the full result is returned or an error; there is no partial output.
///
/// ```no_run
/// use signflow::PipelineOpts;
/// use signflow::engine::DataSigner;
/// use std::sync::Arc;
///
/// let signer = Arc::new(DataSigner::default());
/// let combined = signflow::sign_numbers([0, 1, 2], &PipelineOpts::default(), signer)?;
/// println!("{combined}");
/// # Ok::<(), signflow::Error>(())
/// ```
pub fn sign_numbers<I>(inputs: I, opts: &PipelineOpts, signer: Arc<dyn Signer>) -> Result<String>
where
    I: IntoIterator<Item = i64>,
    I::IntoIter: Send,
{
    sign_numbers_with(inputs, opts, signer, QuotaGuard::global())
}

/// Same as [`sign_numbers`] with a caller-provided quota guard.
pub fn sign_numbers_with<I>(
    inputs: I,
    opts: &PipelineOpts,
    signer: Arc<dyn Signer>,
    quota: Arc<QuotaGuard>,
) -> Result<String>
where
    I: IntoIterator<Item = i64>,
    I::IntoIter: Send,
{
    debug!("pipeline opts: {:?}", opts);
    let pipeline = Pipeline::standard(opts, signer, quota)?;
    let drained = pipeline.run(inputs.into_iter().map(WorkItem::Raw))?;
    single_combined(drained)
}

/// The standard pipeline ends in exactly one combined item.
fn single_combined(drained: Vec<WorkItem>) -> Result<String> {
    let mut drained = drained.into_iter();
    match (drained.next(), drained.next()) {
        (Some(WorkItem::Combined(s)), None) => Ok(s),
        (Some(other), None) => anyhow::bail!("pipeline ended with a {} item", other.kind()),
        (None, _) => anyhow::bail!("pipeline produced no result"),
        (Some(_), Some(_)) => anyhow::bail!("pipeline produced more than one result"),
    }
}
