use std::io::{self, Write};
use std::path::Path;

use crate::palette::{ColorToken, RESET};

use super::sink::SharedSink;

/// Last path component of a directory, used as its display label.
pub fn directory_label(directory: &str) -> String {
    let trimmed = directory.trim_end_matches(['/', '\\']);
    Path::new(trimmed)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.to_string())
}

/// Byte sink that tags every line with a colored `[label]` prefix.
///
/// Each `write` call is treated as self-contained: the chunk is split on `\n`,
/// a trailing unterminated segment is emitted as its own line, and every line
/// goes to the shared sink as one write. Callers that want partial lines
/// carried across reads put a `LineSplitter` in front.
#[derive(Debug, Clone)]
pub struct PrefixedWriter {
    label: String,
    color: ColorToken,
    sink: SharedSink,
}

impl PrefixedWriter {
    pub fn new(directory: &str, color: ColorToken, sink: SharedSink) -> Self {
        Self {
            label: directory_label(directory),
            color,
            sink,
        }
    }

    /// Write one already-split line (without its newline).
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let mut out = Vec::with_capacity(self.label.len() + line.len() + 16);
        out.extend_from_slice(self.color.as_str().as_bytes());
        out.push(b'[');
        out.extend_from_slice(self.label.as_bytes());
        out.push(b']');
        out.extend_from_slice(RESET.as_bytes());
        out.push(b' ');
        out.extend_from_slice(line);
        out.push(b'\n');
        self.sink.write_line(&out)
    }

    /// Write a message that is not part of the subprocess output.
    pub fn write_message(&self, message: &str) -> io::Result<()> {
        for line in message.lines() {
            self.write_line(line.as_bytes())?;
        }
        Ok(())
    }
}

impl Write for PrefixedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut parts: Vec<&[u8]> = buf.split(|b| *b == b'\n').collect();
        if parts.last().is_some_and(|last| last.is_empty()) {
            parts.pop();
        }
        for part in parts {
            self.write_line(part)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sink::testing::Recorder;
    use crate::palette::Palette;
    use pretty_assertions::assert_eq;

    fn writer(dir: &str, rec: &Recorder) -> PrefixedWriter {
        PrefixedWriter::new(dir, Palette::standard().color_for(0), rec.sink())
    }

    #[test]
    fn splits_chunk_into_one_write_per_line() {
        let rec = Recorder::default();
        let mut w = writer("/home/me/src/repoA", &rec);
        let n = w.write(b"line1\nline2\n").unwrap();

        assert_eq!(n, 12);
        assert_eq!(
            rec.writes(),
            vec![
                "\x1b[31m[repoA]\x1b[0m line1\n".to_string(),
                "\x1b[31m[repoA]\x1b[0m line2\n".to_string(),
            ]
        );
    }

    #[test]
    fn trailing_partial_segment_is_its_own_line() {
        let rec = Recorder::default();
        let mut w = writer("repoA", &rec);
        w.write_all(b"done\npartial").unwrap();

        assert_eq!(
            rec.writes(),
            vec![
                "\x1b[31m[repoA]\x1b[0m done\n".to_string(),
                "\x1b[31m[repoA]\x1b[0m partial\n".to_string(),
            ]
        );
    }

    #[test]
    fn keeps_blank_lines_and_drops_carriage_returns() {
        let rec = Recorder::default();
        let mut w = writer("repoA", &rec);
        w.write_all(b"a\r\n\nb\r\n").unwrap();

        let writes = rec.writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0], "\x1b[31m[repoA]\x1b[0m a\n");
        assert_eq!(writes[1], "\x1b[31m[repoA]\x1b[0m \n");
        assert_eq!(writes[2], "\x1b[31m[repoA]\x1b[0m b\n");
    }

    #[test]
    fn empty_chunk_writes_nothing() {
        let rec = Recorder::default();
        let mut w = writer("repoA", &rec);
        assert_eq!(w.write(b"").unwrap(), 0);
        assert!(rec.writes().is_empty());
    }

    #[test]
    fn label_is_basename() {
        assert_eq!(directory_label("/a/b/repo"), "repo");
        assert_eq!(directory_label("/a/b/repo/"), "repo");
        assert_eq!(directory_label("repo"), "repo");
        assert_eq!(directory_label("/"), "/");
    }
}
