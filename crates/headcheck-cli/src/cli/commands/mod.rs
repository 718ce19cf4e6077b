//! CLI command handlers. Each command is in its own file.

mod completions;
mod config_path;
mod manpage;
mod scan;

pub use completions::run_completions;
pub use config_path::run_config_path;
pub use manpage::run_manpage;
pub use scan::run_scan;
