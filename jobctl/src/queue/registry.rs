//! Static catalog of queue identities and their capabilities.
//!
//! Everything here is a total function over the closed [`QueueName`] enum:
//! adding a queue without a capability or slug entry is a compile error, never
//! a silent runtime default.

use engine_api::QueueName;

use crate::queue::command::QueueCommand;

/// Static capability flags for a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapabilities {
    /// Whether the queue accepts bulk `start` commands.
    pub accepts_bulk_commands: bool,
    /// Whether the queue is under operator control. Hidden queues stay
    /// queryable but reject every command.
    pub visible_to_operator: bool,
    /// Read-only queues reject every mutating command.
    pub read_only: bool,
}

impl QueueCapabilities {
    const fn new(accepts_bulk_commands: bool, visible_to_operator: bool, read_only: bool) -> Self {
        Self {
            accepts_bulk_commands,
            visible_to_operator,
            read_only,
        }
    }

    /// Check whether `command` is permitted, returning the violated
    /// constraint otherwise.
    pub fn permits(&self, command: QueueCommand) -> std::result::Result<(), &'static str> {
        if !self.visible_to_operator {
            return Err("queue is not under operator control");
        }
        if self.read_only {
            return Err("queue is read-only");
        }
        if command == QueueCommand::Start && !self.accepts_bulk_commands {
            return Err("queue does not accept bulk commands");
        }
        Ok(())
    }
}

/// Capability flags for a queue. Total and deterministic.
pub fn capabilities(name: QueueName) -> QueueCapabilities {
    match name {
        QueueName::ThumbnailGeneration
        | QueueName::MetadataExtraction
        | QueueName::Library
        | QueueName::Sidecar
        | QueueName::SmartSearch
        | QueueName::DuplicateDetection
        | QueueName::FaceDetection
        | QueueName::FacialRecognition
        | QueueName::Ocr
        | QueueName::VideoConversion
        | QueueName::StorageTemplateMigration
        | QueueName::Migration
        | QueueName::Search => QueueCapabilities::new(true, true, false),
        // Visible in status views but accepts no commands.
        QueueName::BackgroundTask => QueueCapabilities::new(true, true, true),
        // Hidden from operator control, still queryable.
        QueueName::Notifications | QueueName::BackupDatabase => {
            QueueCapabilities::new(true, false, false)
        }
        QueueName::Workflow => QueueCapabilities::new(false, false, false),
    }
}

/// External lowercase-hyphenated form of a queue identity.
pub fn to_slug(name: QueueName) -> &'static str {
    match name {
        QueueName::ThumbnailGeneration => "thumbnail-generation",
        QueueName::MetadataExtraction => "metadata-extraction",
        QueueName::Library => "library",
        QueueName::Sidecar => "sidecar",
        QueueName::SmartSearch => "smart-search",
        QueueName::DuplicateDetection => "duplicate-detection",
        QueueName::FaceDetection => "face-detection",
        QueueName::FacialRecognition => "facial-recognition",
        QueueName::Ocr => "ocr",
        QueueName::VideoConversion => "video-conversion",
        QueueName::StorageTemplateMigration => "storage-template-migration",
        QueueName::Migration => "migration",
        QueueName::BackgroundTask => "background-task",
        QueueName::Search => "search",
        QueueName::Notifications => "notifications",
        QueueName::BackupDatabase => "backup-database",
        QueueName::Workflow => "workflow",
    }
}

/// Resolve an external slug back to its queue identity.
///
/// Absence is a valid outcome: callers render a 404 instead of crashing.
pub fn from_slug(slug: &str) -> Option<QueueName> {
    match slug {
        "thumbnail-generation" => Some(QueueName::ThumbnailGeneration),
        "metadata-extraction" => Some(QueueName::MetadataExtraction),
        "library" => Some(QueueName::Library),
        "sidecar" => Some(QueueName::Sidecar),
        "smart-search" => Some(QueueName::SmartSearch),
        "duplicate-detection" => Some(QueueName::DuplicateDetection),
        "face-detection" => Some(QueueName::FaceDetection),
        "facial-recognition" => Some(QueueName::FacialRecognition),
        "ocr" => Some(QueueName::Ocr),
        "video-conversion" => Some(QueueName::VideoConversion),
        "storage-template-migration" => Some(QueueName::StorageTemplateMigration),
        "migration" => Some(QueueName::Migration),
        "background-task" => Some(QueueName::BackgroundTask),
        "search" => Some(QueueName::Search),
        "notifications" => Some(QueueName::Notifications),
        "backup-database" => Some(QueueName::BackupDatabase),
        "workflow" => Some(QueueName::Workflow),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_capabilities_total_and_deterministic() {
        for name in QueueName::iter() {
            assert_eq!(capabilities(name), capabilities(name));
        }
    }

    #[test]
    fn test_slug_round_trip() {
        for name in QueueName::iter() {
            assert_eq!(from_slug(to_slug(name)), Some(name));
        }
    }

    #[test]
    fn test_slug_matches_camel_form() {
        // The slug is the lower-camel identity with hyphenated word breaks.
        for name in QueueName::iter() {
            let camel: String = to_slug(name)
                .split('-')
                .enumerate()
                .map(|(i, word)| {
                    if i == 0 {
                        word.to_string()
                    } else {
                        let mut chars = word.chars();
                        match chars.next() {
                            Some(first) => first.to_uppercase().chain(chars).collect(),
                            None => String::new(),
                        }
                    }
                })
                .collect();
            assert_eq!(camel, name.to_string());
        }
    }

    #[test]
    fn test_unknown_slug_is_none() {
        assert_eq!(from_slug("not-a-real-queue"), None);
        assert_eq!(from_slug(""), None);
        assert_eq!(from_slug("smartSearch"), None);
    }

    #[rstest]
    #[case(QueueName::ThumbnailGeneration, QueueCommand::Start, true)]
    #[case(QueueName::ThumbnailGeneration, QueueCommand::Pause, true)]
    #[case(QueueName::ThumbnailGeneration, QueueCommand::ClearFailed, true)]
    #[case(QueueName::BackgroundTask, QueueCommand::ClearFailed, false)]
    #[case(QueueName::BackgroundTask, QueueCommand::Pause, false)]
    #[case(QueueName::Notifications, QueueCommand::Start, false)]
    #[case(QueueName::BackupDatabase, QueueCommand::Clear, false)]
    #[case(QueueName::Workflow, QueueCommand::Start, false)]
    fn test_command_gating(
        #[case] queue: QueueName,
        #[case] command: QueueCommand,
        #[case] permitted: bool,
    ) {
        assert_eq!(capabilities(queue).permits(command).is_ok(), permitted);
    }
}
