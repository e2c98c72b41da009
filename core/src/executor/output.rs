use crate::output::{PrefixedWriter, SharedSink};

use super::types::TaskResult;

/// Print a failed result once, tagged with its directory and color.
pub fn report_failure(sink: &SharedSink, result: &TaskResult) {
    let Some(err) = &result.error else {
        return;
    };
    let writer = PrefixedWriter::new(&result.directory, result.color, sink.clone());
    if let Err(e) = writer.write_message(&err.to_string()) {
        tracing::warn!(directory = %result.directory, "failed to print task error: {e}");
    }
}
