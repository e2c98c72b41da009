use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Handle to the one output stream all workers write to.
///
/// Each `write_line` holds the lock for exactly one `write_all`, so lines from
/// different tasks never interleave mid-line.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedSink {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output sink lock poisoned"))?;
        guard.write_all(line)?;
        guard.flush()
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Recorder;

    #[test]
    fn each_line_is_a_single_write() {
        let rec = Recorder::default();
        let sink = rec.sink();
        sink.write_line(b"one\n").unwrap();
        sink.clone().write_line(b"two\n").unwrap();
        assert_eq!(rec.writes(), vec!["one\n", "two\n"]);
    }
}
