pub mod config;
pub mod logger;
pub mod signflow_toml;

pub use config::*;
pub use logger::setup_logging;
pub use signflow_toml::{SignflowToml, apply_file_to_opts, load_signflow_toml};
