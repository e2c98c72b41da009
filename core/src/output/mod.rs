//! Line-atomic, prefixed output shared by every concurrently running task.
mod lines;
mod prefixed;
pub(crate) mod sink;

pub use lines::LineSplitter;
pub use prefixed::{directory_label, PrefixedWriter};
pub use sink::SharedSink;
