//! CLI command handlers, one per file.

mod completions;
mod known;
mod man;
mod run;

pub use completions::run_completions;
pub use known::run_known;
pub use man::run_man;
pub use run::run_audit;
