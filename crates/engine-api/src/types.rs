//! Shared queue and job vocabulary.
//!
//! These types are the wire language between the control plane and the
//! execution engine. `QueueName` and `JobName` are closed enums: adding a
//! queue means adding a variant here and extending the exhaustive matches,
//! which the compiler enforces.

use serde::{Deserialize, Serialize};

/// Named background-processing queues.
///
/// Serialized in lower-camel form (e.g. `thumbnailGeneration`), matching the
/// external API representation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    utoipa::ToSchema,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum QueueName {
    ThumbnailGeneration,
    MetadataExtraction,
    Library,
    Sidecar,
    SmartSearch,
    DuplicateDetection,
    FaceDetection,
    FacialRecognition,
    Ocr,
    VideoConversion,
    StorageTemplateMigration,
    Migration,
    BackgroundTask,
    Search,
    Notifications,
    BackupDatabase,
    Workflow,
}

/// Job kinds, as observed on records flowing through the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    utoipa::ToSchema,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum JobName {
    GenerateThumbnails,
    ExtractMetadata,
    ScanLibrary,
    DiscoverSidecars,
    EncodeClip,
    DetectDuplicates,
    DetectFaces,
    RecognizeFaces,
    OcrImage,
    TranscodeVideo,
    MigrateStorageTemplate,
    MigrateAssets,
    RunBackgroundTask,
    IndexSearch,
    SendNotification,
    CreateDatabaseBackup,
    RunWorkflow,
}

impl JobName {
    /// The job kind a bulk `Start` command enqueues for the given queue.
    pub fn bulk_for(queue: QueueName) -> Self {
        match queue {
            QueueName::ThumbnailGeneration => Self::GenerateThumbnails,
            QueueName::MetadataExtraction => Self::ExtractMetadata,
            QueueName::Library => Self::ScanLibrary,
            QueueName::Sidecar => Self::DiscoverSidecars,
            QueueName::SmartSearch => Self::EncodeClip,
            QueueName::DuplicateDetection => Self::DetectDuplicates,
            QueueName::FaceDetection => Self::DetectFaces,
            QueueName::FacialRecognition => Self::RecognizeFaces,
            QueueName::Ocr => Self::OcrImage,
            QueueName::VideoConversion => Self::TranscodeVideo,
            QueueName::StorageTemplateMigration => Self::MigrateStorageTemplate,
            QueueName::Migration => Self::MigrateAssets,
            QueueName::BackgroundTask => Self::RunBackgroundTask,
            QueueName::Search => Self::IndexSearch,
            QueueName::Notifications => Self::SendNotification,
            QueueName::BackupDatabase => Self::CreateDatabaseBackup,
            QueueName::Workflow => Self::RunWorkflow,
        }
    }
}

/// Status of a job as reported by the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    utoipa::ToSchema,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum JobStatus {
    Active,
    Completed,
    Failed,
    Delayed,
    Waiting,
    Paused,
}

/// Bulk-dispatch mode for the `Start` command.
///
/// The original wire format models this as an optional boolean where absence
/// carries its own meaning; the three states are first-class here.
/// `Unspecified` is forwarded to the engine untouched; the engine owns the
/// default, and callers must not assume it equals `MissingOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum StartMode {
    /// Caller expressed no preference; the engine applies its default.
    Unspecified,
    /// Reprocess every eligible asset.
    All,
    /// Process only assets missing this queue's output.
    MissingOnly,
}

impl StartMode {
    /// Map the wire-level optional `force` flag to an explicit mode.
    pub fn from_force(force: Option<bool>) -> Self {
        match force {
            None => Self::Unspecified,
            Some(true) => Self::All,
            Some(false) => Self::MissingOnly,
        }
    }
}

/// A job as observed through the engine's browse interface.
///
/// The control plane filters and aggregates these; it never defines their
/// execution semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JobRecord {
    /// Engine-assigned identifier, when the engine exposes one.
    pub id: Option<String>,
    pub name: JobName,
    /// Opaque structured payload.
    pub data: serde_json::Value,
    pub status: JobStatus,
}

/// Snapshot of a queue's job counts, sourced from the engine at query time.
///
/// No staleness guarantee is made beyond "as of last poll".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
pub struct QueueStatistics {
    pub active: u64,
    pub completed: u64,
    pub failed: u64,
    pub delayed: u64,
    pub waiting: u64,
    pub paused: u64,
}

impl QueueStatistics {
    /// Jobs still pending execution (everything except active and completed).
    pub fn pending(&self) -> u64 {
        self.failed + self.delayed + self.waiting + self.paused
    }
}
