use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};

use crate::error::TaskError;

use super::types::{RunSummary, Task, TaskResult};

/// Fan `tasks` out to a fixed pool of workers and fan their results back in.
///
/// # Arguments
///
/// * `tasks` - One task per directory
/// * `concurrency` - Worker count (clamped to `1..=tasks.len()`)
/// * `executor_fn` - Runs a single task; must not fail, errors go in the result
/// * `on_result` - Called once per result, in completion order
///
/// # Returns
///
/// A summary holding exactly one result per submitted task
pub async fn run_pool<F, Fut, R>(
    tasks: Vec<Task>,
    concurrency: usize,
    executor_fn: F,
    mut on_result: R,
) -> RunSummary
where
    F: Fn(Task) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = TaskResult> + Send + 'static,
    R: FnMut(&TaskResult),
{
    let started_at = Instant::now();
    let total = tasks.len();
    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };
    if total == 0 {
        return summary;
    }

    let workers = concurrency.clamp(1, total);
    tracing::debug!(total, workers, "starting worker pool");

    // Pending queue: filled up front, then closed so workers stop when it drains.
    let (task_tx, task_rx) = mpsc::channel::<Task>(total);
    for task in tasks {
        // capacity == total and the receiver is held below, so this never waits or fails
        let _ = task_tx.send(task).await;
    }
    drop(task_tx);
    let task_rx = Arc::new(Mutex::new(task_rx));

    let (result_tx, mut result_rx) = mpsc::channel::<TaskResult>(total);

    let handles: Vec<_> = (0..workers)
        .map(|worker_id| {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let executor = executor_fn.clone();
            tokio::spawn(async move {
                loop {
                    let next = task_rx.lock().await.recv().await;
                    let Some(task) = next else {
                        break;
                    };
                    let directory = task.directory.clone();
                    let color = task.color;

                    // Own job per task so a panic costs one result, not the worker.
                    let result = match tokio::spawn(executor(task)).await {
                        Ok(result) => result,
                        Err(e) => {
                            tracing::error!(
                                worker_id,
                                directory = %directory,
                                "task panicked: {e}"
                            );
                            let err = TaskError::WorkerPanicked(e.to_string());
                            TaskResult::failed(directory, color, err)
                        }
                    };

                    if result_tx.send(result).await.is_err() {
                        break;
                    }
                }
                tracing::trace!(worker_id, "worker drained");
            })
        })
        .collect();
    drop(result_tx);

    // Join barrier: the results stream ends only after every worker exited.
    let barrier = tokio::spawn(async move {
        for joined in join_all(handles).await {
            if let Err(e) = joined {
                tracing::error!("worker exited abnormally: {e}");
            }
        }
    });

    while let Some(result) = result_rx.recv().await {
        on_result(&result);
        summary.record(result);
    }
    let _ = barrier.await;

    if summary.results.len() != total {
        tracing::error!(
            expected = total,
            received = summary.results.len(),
            "worker pool lost results"
        );
    }

    summary.duration_ms = started_at.elapsed().as_millis() as u64;
    summary
}
