use clap::Parser;

struct DefaultArgs;

impl DefaultArgs {
    /// Signed when neither numbers nor `--count` are given.
    pub const INPUTS: &'static [i64] = &[0, 1, 1, 2, 3, 5, 8];
}

/// Bounded-concurrency hashing pipeline.
#[derive(Clone, Parser)]
#[command(name = "signflow")]
#[command(about = "Sign integers through the dual-hash, six-way and combine stages; print the combined result.")]
pub struct Cli {
    /// Integers to sign. Default: 0 1 1 2 3 5 8.
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub numbers: Vec<i64>,

    /// Sign 0..COUNT instead of explicit numbers.
    #[arg(long, short = 'n', conflicts_with = "numbers")]
    pub count: Option<i64>,

    /// Capacity of every inter-stage queue (backpressure threshold).
    #[arg(long)]
    pub queue_cap: Option<usize>,

    /// Worker pool size of the dual-hash stage.
    #[arg(long)]
    pub dual_workers: Option<usize>,

    /// Worker pool size of the six-way stage.
    #[arg(long)]
    pub six_workers: Option<usize>,

    /// Salt appended to every signer input.
    #[arg(long, short = 's')]
    pub salt: Option<String>,

    /// Sleep inside the signer like the real collaborator (1 s cheap, 10 ms expensive).
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub simulate_latency: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

impl Cli {
    /// Integers to feed, in order.
    pub fn inputs(&self) -> Vec<i64> {
        match self.count {
            Some(n) => (0..n).collect(),
            None if self.numbers.is_empty() => DefaultArgs::INPUTS.to_vec(),
            None => self.numbers.clone(),
        }
    }
}
