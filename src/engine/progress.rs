//! Progress counter for items fed into the pipeline (CLI verbose mode).

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a progress bar with a known total.
pub fn create_progress_bar(total: usize, desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " items"
    )))
}

/// Advance the bar by `n`. Only the feeder thread ticks it, so the lock is uncontended.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.lock() {
        let _ = pb.update(n);
    }
}

/// Redraw once, e.g. after the pipeline returned.
pub fn finish_progress_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.refresh();
    }
}

/// Wrap `inputs` so each item pulled by the feeder ticks `bar`.
pub fn counted<I>(inputs: I, bar: Option<&ProgressBar>) -> impl Iterator<Item = I::Item> + Send
where
    I: IntoIterator,
    I::IntoIter: Send,
{
    let bar = bar.map(Arc::clone);
    inputs.into_iter().inspect(move |_| {
        if let Some(bar) = &bar {
            update_progress_bar(bar, 1);
        }
    })
}
