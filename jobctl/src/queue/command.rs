//! Operator command validation and dispatch.

use std::sync::Arc;

use engine_api::{ExecutionEngine, QueueName, StartMode};
use serde::{Deserialize, Serialize};

use crate::queue::registry;
use crate::queue::state::QueueStateStore;
use crate::{Error, Result};

/// Operator commands. Named verbs, not queue-specific; the processor rejects
/// commands a queue's capabilities do not permit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    utoipa::ToSchema,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum QueueCommand {
    /// Bulk-dispatch processing; the start mode picks all vs missing-only.
    Start,
    Pause,
    Resume,
    /// Purge all non-active jobs.
    Clear,
    /// Purge failed jobs only.
    ClearFailed,
}

/// Validates operator commands and turns them into state transitions or
/// engine dispatches.
///
/// Validation always happens before any mutation: a rejected command leaves
/// both the state store and the engine untouched. The control-plane effect is
/// synchronous; engine dispatches return once acknowledged, never once the
/// work completes.
pub struct CommandProcessor {
    store: Arc<QueueStateStore>,
    engine: Arc<dyn ExecutionEngine>,
}

impl CommandProcessor {
    pub fn new(store: Arc<QueueStateStore>, engine: Arc<dyn ExecutionEngine>) -> Self {
        Self { store, engine }
    }

    /// Execute `command` against `name`. `mode` only applies to
    /// [`QueueCommand::Start`] and is forwarded to the engine untouched.
    pub async fn execute(
        &self,
        name: QueueName,
        command: QueueCommand,
        mode: StartMode,
    ) -> Result<()> {
        if let Err(reason) = registry::capabilities(name).permits(command) {
            return Err(Error::CommandNotSupported {
                queue: name,
                command,
                reason,
            });
        }

        match command {
            QueueCommand::Pause => {
                self.store.set_paused(name, true).await?;
            }
            QueueCommand::Resume => {
                self.store.set_paused(name, false).await?;
            }
            QueueCommand::Start => {
                self.engine
                    .start(name, mode)
                    .await
                    .map_err(|source| Error::EngineUnavailable {
                        queue: name,
                        operation: "start dispatch",
                        source,
                    })?;
            }
            QueueCommand::Clear => {
                self.dispatch_clear(name, false).await?;
            }
            QueueCommand::ClearFailed => {
                self.dispatch_clear(name, true).await?;
            }
        }

        tracing::info!(queue = %name, %command, "Queue command dispatched");
        Ok(())
    }

    async fn dispatch_clear(&self, name: QueueName, failed_only: bool) -> Result<()> {
        self.engine
            .clear(name, failed_only)
            .await
            .map_err(|source| Error::EngineUnavailable {
                queue: name,
                operation: "clear dispatch",
                source,
            })
    }
}
