use serde::{Deserialize, Serialize};

use fs_storage::{PROJECT_FILES_KEY, TASK_FILES_KEY};

/// Metadata-only record of a file the user attached.
/// Content is never read or stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Selects one of the two independent append-only file lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Project,
    Task,
}

impl FileKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            FileKind::Project => PROJECT_FILES_KEY,
            FileKind::Task => TASK_FILES_KEY,
        }
    }
}

/// Two independent ordered lists of file metadata records.
/// Entries are append-only: no dedup, no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileManifest {
    project_files: Vec<FileEntry>,
    task_files: Vec<FileEntry>,
}

impl FileManifest {
    /// Decode one list from its persisted JSON value.
    /// An absent or undecodable value hydrates as an empty list.
    pub fn hydrate_list(kind: FileKind, raw: Option<&String>) -> Vec<FileEntry> {
        match raw {
            Some(json) => serde_json::from_str(json).unwrap_or_else(|err| {
                log::warn!(
                    "discarding undecodable {} list: {}",
                    kind.storage_key(),
                    err
                );
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    pub fn new(
        project_files: Vec<FileEntry>,
        task_files: Vec<FileEntry>,
    ) -> Self {
        Self {
            project_files,
            task_files,
        }
    }

    pub fn files(&self, kind: FileKind) -> &[FileEntry] {
        match kind {
            FileKind::Project => &self.project_files,
            FileKind::Task => &self.task_files,
        }
    }

    /// Append entries to the chosen list, preserving input order.
    pub fn append(
        &mut self,
        kind: FileKind,
        entries: impl IntoIterator<Item = FileEntry>,
    ) {
        let list = match kind {
            FileKind::Project => &mut self.project_files,
            FileKind::Task => &mut self.task_files,
        };
        list.extend(entries);
    }
}
