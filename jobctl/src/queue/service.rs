//! Status read path and the exposed control-plane surface.

use std::sync::Arc;

use engine_api::{ExecutionEngine, JobRecord, JobStatus, QueueName, QueueStatistics, StartMode};
use strum::IntoEnumIterator;
use tokio::sync::broadcast;

use crate::queue::command::{CommandProcessor, QueueCommand};
use crate::queue::events::QueueEvent;
use crate::queue::registry;
use crate::queue::state::QueueStateStore;
use crate::{Error, Result};

/// A queue's composed status: control state plus live engine statistics.
///
/// `statistics` is `None` when the engine could not be reached. Unknown and
/// zero are not the same thing to an operator, so failed reads are never
/// reported as zeros.
#[derive(Debug, Clone)]
pub struct QueueDescription {
    pub name: QueueName,
    pub is_paused: bool,
    pub statistics: Option<QueueStatistics>,
}

/// Transport-agnostic control-plane surface: composes the registry, the state
/// store and the engine's live view.
pub struct QueueService {
    store: Arc<QueueStateStore>,
    engine: Arc<dyn ExecutionEngine>,
    processor: CommandProcessor,
}

impl QueueService {
    pub fn new(store: Arc<QueueStateStore>, engine: Arc<dyn ExecutionEngine>) -> Self {
        let processor = CommandProcessor::new(store.clone(), engine.clone());
        Self {
            store,
            engine,
            processor,
        }
    }

    /// Resolve an external slug, failing with `UnknownQueue` when absent.
    pub fn resolve_slug(&self, slug: &str) -> Result<QueueName> {
        registry::from_slug(slug).ok_or_else(|| Error::unknown_queue(slug))
    }

    /// Read the queue's statistics from the engine.
    pub async fn statistics(&self, name: QueueName) -> Result<QueueStatistics> {
        self.engine
            .statistics(name)
            .await
            .map_err(|source| Error::StatisticsUnavailable {
                queue: name,
                source,
            })
    }

    /// Compose control state and live statistics for one queue.
    ///
    /// A failed statistics read degrades to `statistics: None` instead of
    /// failing the whole read.
    pub async fn describe(&self, name: QueueName) -> QueueDescription {
        let state = self.store.get(name).await;
        let statistics = match self.statistics(name).await {
            Ok(statistics) => Some(statistics),
            Err(error) => {
                tracing::warn!(queue = %name, %error, "Statistics read failed");
                None
            }
        };

        QueueDescription {
            name,
            is_paused: state.is_paused,
            statistics,
        }
    }

    /// Describe every queue, including hidden ones (they stay queryable).
    pub async fn describe_all(&self) -> Vec<QueueDescription> {
        let mut descriptions = Vec::new();
        for name in QueueName::iter() {
            descriptions.push(self.describe(name).await);
        }
        descriptions
    }

    /// Apply a pause-state update and return the resulting description.
    ///
    /// An absent flag is a no-op read. Goes through the command processor so
    /// capability gating applies the same as for explicit pause/resume
    /// commands.
    pub async fn update(
        &self,
        name: QueueName,
        is_paused: Option<bool>,
    ) -> Result<QueueDescription> {
        if let Some(paused) = is_paused {
            let command = if paused {
                QueueCommand::Pause
            } else {
                QueueCommand::Resume
            };
            self.processor
                .execute(name, command, StartMode::Unspecified)
                .await?;
        }
        Ok(self.describe(name).await)
    }

    /// Validate and dispatch an operator command.
    pub async fn run_command(
        &self,
        name: QueueName,
        command: QueueCommand,
        force: Option<bool>,
    ) -> Result<()> {
        self.processor
            .execute(name, command, StartMode::from_force(force))
            .await
    }

    /// Purge queued work, or failed jobs only. The two destructive modes are
    /// mutually exclusive by construction.
    pub async fn empty(&self, name: QueueName, failed: bool) -> Result<()> {
        let command = if failed {
            QueueCommand::ClearFailed
        } else {
            QueueCommand::Clear
        };
        self.processor
            .execute(name, command, StartMode::Unspecified)
            .await
    }

    /// List jobs filtered by status. An empty filter means all statuses.
    pub async fn search_jobs(
        &self,
        name: QueueName,
        status_filter: &[JobStatus],
    ) -> Result<Vec<JobRecord>> {
        self.engine
            .list_jobs(name, status_filter)
            .await
            .map_err(|source| Error::EngineUnavailable {
                queue: name,
                operation: "job search",
                source,
            })
    }

    /// Subscribe to committed queue state transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use engine_api::{InMemoryEngine, JobName};
    use serde_json::json;

    use crate::database::repositories::queue_state::tests::memory_repository;
    use crate::queue::events::QueueEventBroadcaster;

    use super::*;

    async fn service() -> (QueueService, Arc<InMemoryEngine>) {
        let engine = Arc::new(InMemoryEngine::new());
        let store = Arc::new(
            QueueStateStore::load(memory_repository(), QueueEventBroadcaster::new())
                .await
                .unwrap(),
        );
        (QueueService::new(store, engine.clone()), engine)
    }

    #[tokio::test]
    async fn test_describe_composes_state_and_statistics() {
        let (service, engine) = service().await;
        engine.push(
            QueueName::FaceDetection,
            JobRecord {
                id: None,
                name: JobName::DetectFaces,
                data: json!({}),
                status: JobStatus::Waiting,
            },
        );

        let description = service.describe(QueueName::FaceDetection).await;
        assert!(!description.is_paused);
        assert_eq!(description.statistics.unwrap().waiting, 1);
    }

    #[tokio::test]
    async fn test_describe_degrades_to_unknown_statistics() {
        let (service, engine) = service().await;
        engine.set_unavailable(true);

        let description = service.describe(QueueName::Ocr).await;
        // Unknown, not fabricated zeros.
        assert!(description.statistics.is_none());
    }

    #[tokio::test]
    async fn test_describe_all_covers_every_queue() {
        let (service, _) = service().await;
        let descriptions = service.describe_all().await;
        assert_eq!(descriptions.len(), QueueName::iter().count());
    }

    #[tokio::test]
    async fn test_update_persists_across_read() {
        let (service, _) = service().await;

        let updated = service
            .update(QueueName::VideoConversion, Some(true))
            .await
            .unwrap();
        assert!(updated.is_paused);

        let read_back = service.describe(QueueName::VideoConversion).await;
        assert!(read_back.is_paused);
    }

    #[tokio::test]
    async fn test_update_without_flag_is_a_read() {
        let (service, _) = service().await;
        let description = service.update(QueueName::Migration, None).await.unwrap();
        assert!(!description.is_paused);
    }

    #[tokio::test]
    async fn test_empty_failed_never_clears_waiting() {
        let (service, engine) = service().await;
        engine.push(
            QueueName::Library,
            JobRecord {
                id: None,
                name: JobName::ScanLibrary,
                data: json!({}),
                status: JobStatus::Waiting,
            },
        );
        engine.push(
            QueueName::Library,
            JobRecord {
                id: None,
                name: JobName::ScanLibrary,
                data: json!({}),
                status: JobStatus::Failed,
            },
        );

        service.empty(QueueName::Library, true).await.unwrap();

        let stats = service.statistics(QueueName::Library).await.unwrap();
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.waiting, 1);
    }

    #[tokio::test]
    async fn test_resolve_slug_not_found() {
        let (service, _) = service().await;
        assert!(matches!(
            service.resolve_slug("not-a-real-queue"),
            Err(Error::UnknownQueue(_))
        ));
        assert_eq!(
            service.resolve_slug("smart-search").unwrap(),
            QueueName::SmartSearch
        );
    }

    #[tokio::test]
    async fn test_search_jobs_propagates_engine_failure() {
        let (service, engine) = service().await;
        engine.set_unavailable(true);

        let err = service
            .search_jobs(QueueName::Search, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable { .. }));
    }
}
