//! CLI command handler: merge config file and flags, run the standard pipeline, print the result.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::hashing::{DataSigner, SignerLatency};
use crate::engine::progress::{counted, create_progress_bar, finish_progress_bar};
use crate::engine::quota::QuotaGuard;
use crate::sign_numbers_with;
use crate::utils::{apply_file_to_opts, load_signflow_toml, setup_logging};

/// Overwrite opts field from a CLI flag when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $target:expr, $flag:ident => $field:ident) => {
        if let Some(v) = $cli.$flag.clone() {
            $target.$field = v;
        }
    };
}

/// Defaults, then `.signflow.toml` in `dir`, then CLI flags. Installs the logger.
fn setup_opts(cli: &Cli, dir: &Path) -> Opts {
    let mut opts = Opts::default();
    let file = load_signflow_toml(dir);
    if let Ok(Some(ref f)) = file {
        apply_file_to_opts(f, &mut opts);
    }
    apply_cli_opt!(cli, opts.pipeline, queue_cap => queue_capacity);
    apply_cli_opt!(cli, opts.pipeline, dual_workers => dual_hash_workers);
    apply_cli_opt!(cli, opts.pipeline, six_workers => six_way_workers);
    apply_cli_opt!(cli, opts, salt => salt);
    apply_cli_opt!(cli, opts, simulate_latency => simulate_latency);
    apply_cli_opt!(cli, opts, verbose => verbose);

    setup_logging(opts.verbose);
    if let Err(e) = file {
        warn!("ignoring config file: {e:#}");
    }
    opts
}

pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli, Path::new("."));
    let inputs = cli.inputs();
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let latency = if opts.simulate_latency {
        SignerLatency::realistic()
    } else {
        SignerLatency::default()
    };
    let signer = Arc::new(DataSigner::new(opts.salt.clone(), latency));

    let total = inputs.len();
    let bar = opts.verbose.then(|| create_progress_bar(total, "Signing"));
    let result = sign_numbers_with(
        counted(inputs, bar.as_ref()),
        &opts.pipeline,
        signer,
        QuotaGuard::global(),
    );
    if let Some(bar) = &bar {
        finish_progress_bar(bar);
        eprintln!();
    }

    println!("{}", result?);
    Ok(())
}
