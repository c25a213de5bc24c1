//! Engine: signer collaborator, quota guard, CLI and progress reporting.

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod progress;
pub mod quota;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use hashing::{DataSigner, Signer, SignerLatency, blake3_hex, crc32_decimal};
pub use quota::{QuotaGuard, QuotaPermit};
