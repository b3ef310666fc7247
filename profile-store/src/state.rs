use std::path::Path;

use data_error::{ProfileError, Result};
use data_profile::{
    encode_data_uri, validate_profile, LinkField, LinkWarning, Profile,
    TagCommit, TagGroup, ValidationError, Visibility, MAX_LINKS, MAX_TAGS,
};
use fs_storage::{
    base_storage::BaseStorage, file_storage::FileStorage, PROFILE_KEY,
    PROFILE_VISIBILITY_KEY,
};

use crate::manifest::{FileEntry, FileKind, FileManifest};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All rules passed and the profile was persisted.
    Saved,
    /// At least one field failed its rule; nothing was written.
    Rejected(Vec<ValidationError>),
}

/// Application state over an injected storage backend.
///
/// This is the single mutation entry point for the whole aggregate:
/// form fields, tag lists, links, visibility and the file manifest
/// all funnel through here, and every mutation is mirrored to the
/// storage immediately (one key, one write for the profile).
pub struct AppState<S: BaseStorage<String, String>> {
    storage: S,
    profile: Profile,
    manifest: FileManifest,
}

impl AppState<FileStorage<String, String>> {
    /// Open (or create) the storage file at `path` and hydrate from it.
    ///
    /// An unreadable store file (garbage content, version mismatch)
    /// is treated as an empty one: hydration yields defaults and the
    /// next write replaces the broken file.
    pub fn open(label: &str, path: &Path) -> Result<Self> {
        let storage = FileStorage::hydrate(label.to_owned(), path)
            .unwrap_or_else(|err| {
                log::warn!("starting from an empty store: {}", err);
                FileStorage::new(label.to_owned(), path)
            });
        Self::new(storage)
    }
}

impl<S: BaseStorage<String, String>> AppState<S> {
    /// Hydrate the profile and file manifest from an already-loaded
    /// storage. An absent or undecodable profile value yields the
    /// default profile; hydration never fails on bad data.
    ///
    /// The standalone visibility key written by earlier versions takes
    /// precedence over the embedded field. It is dropped on the next
    /// successful save and never written again.
    pub fn new(storage: S) -> Result<Self> {
        let mut profile = match storage.get(&PROFILE_KEY.to_owned()) {
            Some(json) => serde_json::from_str(json).unwrap_or_else(|err| {
                log::warn!("discarding undecodable profile: {}", err);
                Profile::default()
            }),
            None => Profile::default(),
        };

        if let Some(raw) = storage.get(&PROFILE_VISIBILITY_KEY.to_owned()) {
            match raw.parse::<Visibility>() {
                Ok(visibility) => {
                    log::debug!(
                        "visibility taken from legacy key: {:?}",
                        visibility
                    );
                    profile.profile_visibility = visibility;
                }
                Err(_) => {
                    log::warn!("ignoring unparsable legacy visibility: {}", raw)
                }
            }
        }

        let manifest = FileManifest::new(
            FileManifest::hydrate_list(
                FileKind::Project,
                storage.get(&FileKind::Project.storage_key().to_owned()),
            ),
            FileManifest::hydrate_list(
                FileKind::Task,
                storage.get(&FileKind::Task.storage_key().to_owned()),
            ),
        );

        Ok(Self {
            storage,
            profile,
            manifest,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn files(&self, kind: FileKind) -> &[FileEntry] {
        self.manifest.files(kind)
    }

    /// Serialize the whole profile under one key and write it out,
    /// retiring the legacy visibility key along the way.
    fn persist_profile(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.profile)?;
        self.storage.set(PROFILE_KEY.to_owned(), json);
        let legacy_key = PROFILE_VISIBILITY_KEY.to_owned();
        if self.storage.get(&legacy_key).is_some() {
            self.storage.remove(&legacy_key)?;
        }
        self.storage.write_fs()
    }

    /// Update one named field and persist. Unknown names are stored
    /// verbatim; validation happens on blur and submit, not here.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        self.profile.set_field(field, value);
        self.persist_profile()
    }

    /// Validate an image payload, encode it as a data URI and persist.
    /// Rejection happens before any state change.
    pub fn attach_avatar(&mut self, mime: &str, bytes: &[u8]) -> Result<()> {
        let data_uri = encode_data_uri(mime, bytes)
            .map_err(|err| ProfileError::Avatar(err.to_string()))?;
        self.profile.set_avatar(data_uri);
        self.persist_profile()
    }

    pub fn set_visibility(&mut self, visibility: Visibility) -> Result<()> {
        self.profile.profile_visibility = visibility;
        self.persist_profile()
    }

    /// Replace the in-memory profile with the default one.
    /// Nothing is persisted until the next mutation or submit.
    pub fn reset(&mut self) {
        self.profile = Profile::default();
    }

    /// Append an empty tag placeholder. Refused (returning `false`)
    /// once the list holds [`MAX_TAGS`] entries.
    pub fn add_tag(&mut self, group: TagGroup) -> Result<bool> {
        if self.profile.tag_list(group).len() >= MAX_TAGS {
            return Ok(false);
        }
        self.profile.tag_list_mut(group).add();
        self.persist_profile()?;
        Ok(true)
    }

    /// Commit an in-place tag edit. A rejected edit leaves both the
    /// list and the persisted value unchanged.
    pub fn commit_tag(
        &mut self,
        group: TagGroup,
        index: usize,
        raw: &str,
    ) -> Result<TagCommit> {
        let outcome = self.profile.tag_list_mut(group).commit(index, raw);
        if outcome != TagCommit::Rejected {
            self.persist_profile()?;
        }
        Ok(outcome)
    }

    pub fn remove_tag(&mut self, group: TagGroup, index: usize) -> Result<()> {
        self.profile.tag_list_mut(group).remove(index);
        self.persist_profile()
    }

    /// Append an empty link entry. Refused (returning `false`) once
    /// the list holds [`MAX_LINKS`] entries.
    pub fn add_link(&mut self) -> Result<bool> {
        if self.profile.links.len() >= MAX_LINKS {
            return Ok(false);
        }
        self.profile.links.add();
        self.persist_profile()?;
        Ok(true)
    }

    pub fn update_link(
        &mut self,
        index: usize,
        field: LinkField,
        value: &str,
    ) -> Result<()> {
        self.profile.links.update_field(index, field, value);
        self.persist_profile()
    }

    /// Advisory URL-shape check on blur. Warns without blocking and
    /// performs no write beyond what `update_link` already persisted.
    pub fn commit_link(&self, index: usize) -> Option<LinkWarning> {
        self.profile.links.commit_link(index)
    }

    pub fn remove_link(&mut self, index: usize) -> Result<()> {
        self.profile.links.remove(index);
        self.persist_profile()
    }

    /// Run the rule table over the current profile. Any failure blocks
    /// the save; otherwise the full aggregate is persisted.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let errors = validate_profile(&self.profile);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Rejected(errors));
        }
        self.persist_profile()?;
        Ok(SubmitOutcome::Saved)
    }

    /// Append file metadata records to the chosen manifest list and
    /// persist that list immediately. Entries are never read back for
    /// content, deduplicated or removed.
    pub fn add_files(
        &mut self,
        kind: FileKind,
        entries: impl IntoIterator<Item = FileEntry>,
    ) -> Result<()> {
        self.manifest.append(kind, entries);
        let json = serde_json::to_string(self.manifest.files(kind))?;
        self.storage.set(kind.storage_key().to_owned(), json);
        self.storage.write_fs()
    }
}
