use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tokio::sync::{Semaphore, mpsc, oneshot};
use tracing::Instrument;

use super::analysis_pipeline::{AnalysisJob, AnalysisPipeline};

/// How background analyses are admitted.
///
/// `Unbounded` spawns one task per submission with no admission control or
/// queue limit. `Bounded` keeps at most `workers` analyses in flight and
/// buffers up to `queue_depth` more; submitters wait when the queue is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DispatchPolicy {
    #[default]
    Unbounded,
    Bounded { workers: usize, queue_depth: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Failed(String),
}

/// Handle to a submitted job. Dropping it does not cancel the job.
pub struct JobReceipt {
    receiver: oneshot::Receiver<JobOutcome>,
}

impl JobReceipt {
    /// Waits for the job to finish. `None` if the job was lost before reporting.
    pub async fn outcome(self) -> Option<JobOutcome> {
        self.receiver.await.ok()
    }
}

struct QueuedJob {
    job: AnalysisJob,
    reply: oneshot::Sender<JobOutcome>,
}

enum Mode {
    Unbounded,
    Queued(mpsc::Sender<QueuedJob>),
}

pub struct AnalysisDispatcher {
    pipeline: Arc<AnalysisPipeline>,
    mode: Mode,
}

impl AnalysisDispatcher {
    /// Must be called from within a tokio runtime.
    pub fn start(pipeline: Arc<AnalysisPipeline>, policy: DispatchPolicy) -> Self {
        let mode = match policy {
            DispatchPolicy::Unbounded => Mode::Unbounded,
            DispatchPolicy::Bounded {
                workers,
                queue_depth,
            } => {
                let (sender, receiver) = mpsc::channel(queue_depth.max(1));
                let worker = AnalysisWorker {
                    receiver,
                    pipeline: Arc::clone(&pipeline),
                    permits: Arc::new(Semaphore::new(workers.max(1))),
                };
                tokio::spawn(worker.run());
                Mode::Queued(sender)
            }
        };

        tracing::info!(policy = ?policy, "Analysis dispatcher started");
        Self { pipeline, mode }
    }

    pub async fn submit(&self, job: AnalysisJob) -> Result<JobReceipt, DispatchError> {
        let (reply, receiver) = oneshot::channel();

        match &self.mode {
            Mode::Unbounded => {
                let pipeline = Arc::clone(&self.pipeline);
                let span = job_span(&job);
                tokio::spawn(execute(pipeline, job, reply).instrument(span));
            }
            Mode::Queued(sender) => {
                sender
                    .send(QueuedJob { job, reply })
                    .await
                    .map_err(|_| DispatchError::QueueClosed)?;
            }
        }

        Ok(JobReceipt { receiver })
    }
}

struct AnalysisWorker {
    receiver: mpsc::Receiver<QueuedJob>,
    pipeline: Arc<AnalysisPipeline>,
    permits: Arc<Semaphore>,
}

impl AnalysisWorker {
    async fn run(mut self) {
        tracing::info!("Analysis worker started");
        loop {
            // Take a slot first so waiting jobs stay in the bounded queue.
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };
            let Some(QueuedJob { job, reply }) = self.receiver.recv().await else {
                break;
            };

            let pipeline = Arc::clone(&self.pipeline);
            let span = job_span(&job);
            tokio::spawn(
                async move {
                    execute(pipeline, job, reply).await;
                    drop(permit);
                }
                .instrument(span),
            );
        }
        tracing::info!("Analysis worker stopped: channel closed");
    }
}

fn job_span(job: &AnalysisJob) -> tracing::Span {
    tracing::info_span!(
        "analysis_job",
        deviation_id = %job.deviation_id(),
        images = job.image_ids.len(),
        recordings = job.recording_ids.len(),
    )
}

async fn execute(
    pipeline: Arc<AnalysisPipeline>,
    job: AnalysisJob,
    reply: oneshot::Sender<JobOutcome>,
) {
    let started = Instant::now();

    let outcome = match pipeline.run(&job).await {
        Ok(analysis) => {
            tracing::info!(
                transcriptions = analysis.transcriptions.len(),
                image_descriptions = analysis.image_descriptions.len(),
                has_solution = analysis.solution.is_some(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Deviation analysis stored"
            );
            JobOutcome::Completed
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Deviation analysis failed, no analysis stored"
            );
            JobOutcome::Failed(e.to_string())
        }
    };

    let _ = reply.send(outcome);
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("analysis queue closed")]
    QueueClosed,
}
