use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::error::TaskError;
use crate::output::{LineSplitter, PrefixedWriter};

/// Copy a subprocess pipe into the prefixed writer, one complete line at a time.
///
/// Partial lines are carried across reads and flushed at EOF. Returns the
/// number of bytes read.
pub(crate) fn pump<R>(
    mut rd: R,
    writer: PrefixedWriter,
    label: &'static str,
) -> JoinHandle<Result<u64, TaskError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        let mut lines = LineSplitter::new();

        loop {
            let n = rd
                .read(&mut buf)
                .await
                .map_err(|e| TaskError::OutputFailed(format!("{label}: {e}")))?;
            if n == 0 {
                break;
            }
            total += n as u64;

            for line in lines.push(&buf[..n]) {
                writer
                    .write_line(&line)
                    .map_err(|e| TaskError::OutputFailed(format!("{label}: {e}")))?;
            }
        }

        if let Some(rest) = lines.finish() {
            writer
                .write_line(&rest)
                .map_err(|e| TaskError::OutputFailed(format!("{label}: {e}")))?;
        }

        Ok(total)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sink::testing::Recorder;
    use crate::palette::Palette;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn joins_lines_split_across_reads() {
        let rec = Recorder::default();
        let writer = PrefixedWriter::new("/src/app", Palette::standard().color_for(1), rec.sink());
        let (mut wr, rd) = tokio::io::duplex(1024);

        let task = pump(rd, writer, "stdout");
        wr.write_all(b"hel").await.unwrap();
        wr.flush().await.unwrap();
        tokio::task::yield_now().await;
        wr.write_all(b"lo\nlast").await.unwrap();
        drop(wr);

        let total = task.await.unwrap().unwrap();
        assert_eq!(total, 10);
        assert_eq!(
            rec.writes(),
            vec![
                "\x1b[32m[app]\x1b[0m hello\n".to_string(),
                "\x1b[32m[app]\x1b[0m last\n".to_string(),
            ]
        );
    }
}
