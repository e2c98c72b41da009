/// Longest partial line held back before it is emitted as-is.
pub const MAX_PENDING_LINE: usize = 64 * 1024;

/// Accumulates bytes read from a pipe and hands back complete lines.
///
/// A partial trailing line is held until more bytes arrive or `finish` is
/// called at EOF. Only newly appended bytes are searched for `\n`, and a
/// partial line that grows past the limit is emitted as a line of its own.
#[derive(Debug)]
pub struct LineSplitter {
    buf: Vec<u8>,
    /// Bytes of `buf` already known to contain no newline.
    scanned: usize,
    limit: usize,
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::with_limit(MAX_PENDING_LINE)
    }
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            scanned: 0,
            limit: limit.max(1),
        }
    }

    /// Feed a chunk; returns every line completed by it, without `\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        self.buf.extend_from_slice(chunk);
        let mut lines = Vec::new();
        let mut begin = 0;

        while let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            let pos = self.scanned + offset;
            lines.push(self.buf[begin..pos].to_vec());
            begin = pos + 1;
            self.scanned = begin;
        }
        self.buf.drain(..begin);

        while self.buf.len() >= self.limit {
            lines.push(self.buf.drain(..self.limit).collect());
        }
        self.scanned = self.buf.len();
        lines
    }

    /// Flush the last unterminated line, if any.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        self.scanned = 0;
        if self.buf.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buf))
        }
    }
}
