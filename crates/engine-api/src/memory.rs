//! In-memory reference engine.
//!
//! Backs standalone operation and tests. Jobs are held in per-queue stores
//! guarded by a per-queue mutex; completed jobs are counted but not retained.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::json;

use async_trait::async_trait;

use crate::engine::ExecutionEngine;
use crate::error::EngineError;
use crate::types::{JobName, JobRecord, JobStatus, QueueName, QueueStatistics, StartMode};

#[derive(Debug, Default)]
struct JobStore {
    active: Vec<JobRecord>,
    waiting: Vec<JobRecord>,
    delayed: Vec<JobRecord>,
    paused: Vec<JobRecord>,
    failed: Vec<JobRecord>,
    completed: u64,
}

impl JobStore {
    fn statistics(&self) -> QueueStatistics {
        QueueStatistics {
            active: self.active.len() as u64,
            completed: self.completed,
            failed: self.failed.len() as u64,
            delayed: self.delayed.len() as u64,
            waiting: self.waiting.len() as u64,
            paused: self.paused.len() as u64,
        }
    }

    fn bucket_mut(&mut self, status: JobStatus) -> Option<&mut Vec<JobRecord>> {
        match status {
            JobStatus::Active => Some(&mut self.active),
            JobStatus::Waiting => Some(&mut self.waiting),
            JobStatus::Delayed => Some(&mut self.delayed),
            JobStatus::Paused => Some(&mut self.paused),
            JobStatus::Failed => Some(&mut self.failed),
            JobStatus::Completed => None,
        }
    }

    fn collect(&self, status_filter: &[JobStatus]) -> Vec<JobRecord> {
        let wanted = |status: JobStatus| status_filter.is_empty() || status_filter.contains(&status);
        let mut jobs = Vec::new();
        for (status, bucket) in [
            (JobStatus::Active, &self.active),
            (JobStatus::Waiting, &self.waiting),
            (JobStatus::Delayed, &self.delayed),
            (JobStatus::Paused, &self.paused),
            (JobStatus::Failed, &self.failed),
        ] {
            if wanted(status) {
                jobs.extend(bucket.iter().cloned());
            }
        }
        jobs
    }
}

/// Engine backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    queues: DashMap<QueueName, Mutex<JobStore>>,
    unavailable: AtomicBool,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the engine being unreachable; every call fails until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Submit a job directly, placing it in the bucket matching its status.
    pub fn push(&self, queue: QueueName, record: JobRecord) {
        let store = self.queues.entry(queue).or_default();
        let mut store = store.lock();
        match record.status {
            JobStatus::Completed => store.completed += 1,
            status => {
                // bucket_mut is None only for Completed, handled above
                if let Some(bucket) = store.bucket_mut(status) {
                    bucket.push(record);
                }
            }
        }
    }

    fn check_available(&self, queue: QueueName) -> Result<(), EngineError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(EngineError::unavailable(queue, "engine offline"));
        }
        Ok(())
    }

    fn with_store<T>(&self, queue: QueueName, f: impl FnOnce(&mut JobStore) -> T) -> T {
        let store = self.queues.entry(queue).or_default();
        let mut store = store.lock();
        f(&mut store)
    }
}

#[async_trait]
impl ExecutionEngine for InMemoryEngine {
    async fn start(&self, queue: QueueName, mode: StartMode) -> Result<(), EngineError> {
        self.check_available(queue)?;

        // Engine default for an unspecified mode is missing-only.
        let resolved = match mode {
            StartMode::Unspecified => StartMode::MissingOnly,
            other => other,
        };
        let name = JobName::bulk_for(queue);

        self.with_store(queue, |store| {
            // Re-issued bulk starts dedupe against the pending one.
            if store.waiting.iter().any(|job| job.name == name) {
                return;
            }
            store.waiting.push(JobRecord {
                id: Some(uuid::Uuid::new_v4().to_string()),
                name,
                data: json!({ "force": resolved == StartMode::All }),
                status: JobStatus::Waiting,
            });
        });
        Ok(())
    }

    async fn clear(&self, queue: QueueName, failed_only: bool) -> Result<(), EngineError> {
        self.check_available(queue)?;
        self.with_store(queue, |store| {
            if failed_only {
                store.failed.clear();
            } else {
                store.waiting.clear();
                store.delayed.clear();
                store.paused.clear();
            }
        });
        Ok(())
    }

    async fn statistics(&self, queue: QueueName) -> Result<QueueStatistics, EngineError> {
        self.check_available(queue)?;
        Ok(self.with_store(queue, |store| store.statistics()))
    }

    async fn list_jobs(
        &self,
        queue: QueueName,
        status_filter: &[JobStatus],
    ) -> Result<Vec<JobRecord>, EngineError> {
        self.check_available(queue)?;
        Ok(self.with_store(queue, |store| store.collect(status_filter)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(name: JobName, status: JobStatus) -> JobRecord {
        JobRecord {
            id: Some(uuid::Uuid::new_v4().to_string()),
            name,
            data: json!({}),
            status,
        }
    }

    #[tokio::test]
    async fn test_start_records_force_flag() {
        let engine = InMemoryEngine::new();
        engine
            .start(QueueName::ThumbnailGeneration, StartMode::MissingOnly)
            .await
            .unwrap();

        let jobs = engine
            .list_jobs(QueueName::ThumbnailGeneration, &[])
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].name, JobName::GenerateThumbnails);
        assert_eq!(jobs[0].data["force"], json!(false));
    }

    #[tokio::test]
    async fn test_start_dedupes_pending_bulk_job() {
        let engine = InMemoryEngine::new();
        engine
            .start(QueueName::FaceDetection, StartMode::All)
            .await
            .unwrap();
        engine
            .start(QueueName::FaceDetection, StartMode::All)
            .await
            .unwrap();

        let stats = engine.statistics(QueueName::FaceDetection).await.unwrap();
        assert_eq!(stats.waiting, 1);
    }

    #[tokio::test]
    async fn test_unspecified_mode_defaults_to_missing_only() {
        let engine = InMemoryEngine::new();
        engine
            .start(QueueName::Ocr, StartMode::Unspecified)
            .await
            .unwrap();

        let jobs = engine.list_jobs(QueueName::Ocr, &[]).await.unwrap();
        assert_eq!(jobs[0].data["force"], json!(false));
    }

    #[tokio::test]
    async fn test_clear_failed_only_leaves_waiting_jobs() {
        let engine = InMemoryEngine::new();
        engine.push(
            QueueName::Library,
            job(JobName::ScanLibrary, JobStatus::Waiting),
        );
        engine.push(
            QueueName::Library,
            job(JobName::ScanLibrary, JobStatus::Failed),
        );

        engine.clear(QueueName::Library, true).await.unwrap();

        let stats = engine.statistics(QueueName::Library).await.unwrap();
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.waiting, 1);
    }

    #[tokio::test]
    async fn test_clear_purges_non_active_jobs() {
        let engine = InMemoryEngine::new();
        engine.push(
            QueueName::VideoConversion,
            job(JobName::TranscodeVideo, JobStatus::Waiting),
        );
        engine.push(
            QueueName::VideoConversion,
            job(JobName::TranscodeVideo, JobStatus::Delayed),
        );
        engine.push(
            QueueName::VideoConversion,
            job(JobName::TranscodeVideo, JobStatus::Active),
        );
        engine.push(
            QueueName::VideoConversion,
            job(JobName::TranscodeVideo, JobStatus::Failed),
        );

        engine.clear(QueueName::VideoConversion, false).await.unwrap();

        let stats = engine.statistics(QueueName::VideoConversion).await.unwrap();
        assert_eq!(stats.waiting, 0);
        assert_eq!(stats.delayed, 0);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_list_jobs_filters_by_status() {
        let engine = InMemoryEngine::new();
        engine.push(
            QueueName::Migration,
            job(JobName::MigrateAssets, JobStatus::Waiting),
        );
        engine.push(
            QueueName::Migration,
            job(JobName::MigrateAssets, JobStatus::Failed),
        );

        let failed = engine
            .list_jobs(QueueName::Migration, &[JobStatus::Failed])
            .await
            .unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].status, JobStatus::Failed);

        let all = engine.list_jobs(QueueName::Migration, &[]).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_engine_fails_every_call() {
        let engine = InMemoryEngine::new();
        engine.set_unavailable(true);

        let err = engine.statistics(QueueName::Search).await.unwrap_err();
        assert!(matches!(err, EngineError::Unavailable { .. }));
        assert_eq!(err.queue(), QueueName::Search);

        engine.set_unavailable(false);
        assert!(engine.statistics(QueueName::Search).await.is_ok());
    }
}
