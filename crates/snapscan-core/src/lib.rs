pub mod config;
pub mod logging;

pub mod audit;
pub mod error;
pub mod graph;
pub mod known;
pub mod queue;
pub mod release;
pub mod retry;
pub mod urls;
