use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::media::TranscodeOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeJob {
    pub id: String,
    pub input_path: String,
    pub output_path: String,
    pub status: JobStatus,
    pub error: Option<String>,
}

struct QueuedJob {
    job: TranscodeJob,
    options: TranscodeOptions,
}

/// FIFO submission queue for the transcoding panel. This serializes only its
/// own submissions; a direct `start_transcode` call still runs concurrently,
/// there is no mutual exclusion at the media layer.
pub struct TranscodeQueue {
    jobs: Mutex<Vec<QueuedJob>>,
    processing: AtomicBool,
}

impl TranscodeQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            processing: AtomicBool::new(false),
        }
    }

    pub fn enqueue(
        &self,
        input_path: String,
        output_path: String,
        options: TranscodeOptions,
    ) -> TranscodeJob {
        let job = TranscodeJob {
            id: Uuid::new_v4().to_string(),
            input_path,
            output_path,
            status: JobStatus::Pending,
            error: None,
        };
        self.jobs.lock().push(QueuedJob {
            job: job.clone(),
            options,
        });
        job
    }

    pub fn snapshot(&self) -> Vec<TranscodeJob> {
        self.jobs.lock().iter().map(|q| q.job.clone()).collect()
    }

    /// Claim the worker slot. Only the caller that flips the flag runs the
    /// drain loop, which is what keeps submissions one-at-a-time.
    pub fn try_begin_processing(&self) -> bool {
        self.processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn end_processing(&self) {
        self.processing.store(false, Ordering::SeqCst);
    }

    /// Oldest pending job, marked processing.
    pub fn next_pending(&self) -> Option<(String, String, String, TranscodeOptions)> {
        let mut jobs = self.jobs.lock();
        let queued = jobs
            .iter_mut()
            .find(|q| q.job.status == JobStatus::Pending)?;
        queued.job.status = JobStatus::Processing;
        Some((
            queued.job.id.clone(),
            queued.job.input_path.clone(),
            queued.job.output_path.clone(),
            queued.options.clone(),
        ))
    }

    pub fn has_pending(&self) -> bool {
        self.jobs
            .lock()
            .iter()
            .any(|q| q.job.status == JobStatus::Pending)
    }

    pub fn complete(&self, id: &str, result: Result<(), String>) {
        let mut jobs = self.jobs.lock();
        if let Some(queued) = jobs.iter_mut().find(|q| q.job.id == id) {
            match result {
                Ok(()) => queued.job.status = JobStatus::Completed,
                Err(message) => {
                    queued.job.status = JobStatus::Failed;
                    queued.job.error = Some(message);
                }
            }
        }
    }
}
