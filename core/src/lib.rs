//! Run one shell command across many checkouts at once, with every output
//! line tagged by a colored `[directory]` prefix.

pub mod api;
pub mod config;
pub mod error;
pub mod executor;
pub mod git;
pub mod output;
pub mod palette;
pub mod runner;
