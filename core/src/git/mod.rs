//! Git helpers: the `status` summary line and the branch-filter lookup.
mod probe;
mod status;

pub use probe::{GitCli, GitProbe};
pub use status::{parse_status, render_status_line, DirtyState, GitStatusSummary};
