//! Load `.signflow.toml` from a directory (CLI only). Lib callers pass [`PipelineOpts`](crate::PipelineOpts) directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct SignflowToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsSection {
    pub queue_capacity: Option<usize>,
    pub dual_hash_workers: Option<usize>,
    pub six_way_workers: Option<usize>,
    pub salt: Option<String>,
    pub simulate_latency: Option<bool>,
    pub verbose: Option<bool>,
}

/// Read the config file in `dir`. `Ok(None)` when there is no file; `Err` when it exists but
/// cannot be read or parsed (the CLI logs that and carries on with defaults).
pub fn load_signflow_toml(dir: &Path) -> Result<Option<SignflowToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let parsed = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(parsed))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $target:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $target.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &SignflowToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts.pipeline, queue_capacity => queue_capacity);
    apply_file_opt!(s, opts.pipeline, dual_hash_workers => dual_hash_workers);
    apply_file_opt!(s, opts.pipeline, six_way_workers => six_way_workers);
    apply_file_opt!(s, opts, salt => salt);
    apply_file_opt!(s, opts, simulate_latency => simulate_latency);
    apply_file_opt!(s, opts, verbose => verbose);
}
