//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;
use std::time::Duration;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Name of the optional CLI config file (e.g. `.signflow.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Pipeline ----

/// Default queue and pool sizes.
pub struct PipelineDefaults;

impl PipelineDefaults {
    /// Capacity of every inter-stage queue.
    pub const QUEUE_CAPACITY: usize = 100;
    /// Workers in the dual-hash stage.
    pub const DUAL_HASH_WORKERS: usize = 10;
    /// Workers in the six-way stage.
    pub const SIX_WAY_WORKERS: usize = 10;
}

/// Number of prefixed sub-hashes per item in the six-way stage.
pub const SIX_WAY_FANOUT: usize = 6;

/// Separator between the two halves of a dual-hash item.
pub const DUAL_HASH_SEPARATOR: char = '~';

/// Separator between sorted items in the combined result.
pub const COMBINE_SEPARATOR: &str = "_";

// ---- Signer ----

/// Per-call latency of the real signer collaborator, used with `--simulate-latency`.
pub struct SignerLatencyConsts;

impl SignerLatencyConsts {
    pub const CHEAP: Duration = Duration::from_secs(1);
    pub const EXPENSIVE: Duration = Duration::from_millis(10);
}
