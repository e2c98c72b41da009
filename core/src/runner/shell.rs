use std::process::Stdio;

use tokio::process::Command;

use crate::error::TaskError;
use crate::output::PrefixedWriter;

use super::io_pump;
use super::types::ShellInvocation;

/// Run `<shell> -c <command>` in the invocation's directory and stream both
/// of its output pipes through `writer`. Blocks until the subprocess exits.
#[tracing::instrument(
    name = "runner.shell",
    skip(invocation, writer),
    fields(dir = %invocation.directory)
)]
pub async fn run_shell(
    invocation: &ShellInvocation,
    writer: PrefixedWriter,
) -> Result<(), TaskError> {
    let mut child = Command::new(&invocation.shell)
        .arg("-c")
        .arg(&invocation.command)
        .current_dir(&invocation.directory)
        .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| TaskError::spawn(&invocation.shell, &e))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| TaskError::OutputFailed("no stdout".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| TaskError::OutputFailed("no stderr".into()))?;

    let out_task = io_pump::pump(stdout, writer.clone(), "stdout");
    let err_task = io_pump::pump(stderr, writer, "stderr");

    let (out_res, err_res, status) = tokio::join!(out_task, err_task, child.wait());
    let status = status.map_err(|e| TaskError::spawn(&invocation.shell, &e))?;

    for res in [out_res, err_res] {
        let bytes = res.map_err(|e| TaskError::OutputFailed(e.to_string()))??;
        tracing::trace!(bytes, "pipe drained");
    }

    if status.success() {
        Ok(())
    } else {
        Err(TaskError::SubprocessNonZeroExit {
            code: status.code(),
        })
    }
}
