pub mod manifest;
pub mod state;

pub use manifest::{FileEntry, FileKind, FileManifest};
pub use state::{AppState, SubmitOutcome};
