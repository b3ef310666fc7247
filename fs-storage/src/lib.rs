pub mod base_storage;
pub mod file_storage;

/// Key under which the whole profile aggregate is persisted.
pub const PROFILE_KEY: &str = "profile";

/// Legacy standalone mirror of `Profile.profileVisibility`.
/// Read for backward compatibility, never written.
pub const PROFILE_VISIBILITY_KEY: &str = "profileVisibility";

// File manifests, each an independent append-only list
pub const PROJECT_FILES_KEY: &str = "projectFiles";
pub const TASK_FILES_KEY: &str = "taskFiles";
