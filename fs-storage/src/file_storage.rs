use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::base_storage::BaseStorage;
use data_error::{ProfileError, Result};

const STORAGE_VERSION: i32 = 1;

/// A key-value storage that persists its entries
/// as a single JSON file on disk.
///
/// This is the on-disk analogue of an origin-scoped browser store:
/// one flat namespace of string keys, atomic per write from the
/// caller's point of view (one file, one write).
pub struct FileStorage<K, V>
where
    K: Ord,
{
    label: String,
    path: PathBuf,
    data: FileStorageData<K, V>,
}

/// The data that is serialized and deserialized to and from disk.
#[derive(Serialize, Deserialize)]
pub struct FileStorageData<K, V>
where
    K: Ord,
{
    version: i32,
    entries: BTreeMap<K, V>,
}

impl<K, V> FileStorage<K, V>
where
    K: Ord + Clone + serde::Serialize + serde::de::DeserializeOwned,
    V: Clone + serde::Serialize + serde::de::DeserializeOwned,
{
    /// Create a new file storage with a diagnostic label and file path.
    /// Nothing is read or written until [`BaseStorage::read_fs`] or
    /// [`BaseStorage::write_fs`] is called.
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
            data: FileStorageData {
                version: STORAGE_VERSION,
                entries: BTreeMap::new(),
            },
        }
    }

    /// Load the persisted entries if the storage file exists,
    /// leaving the mapping empty otherwise.
    pub fn hydrate(label: String, path: &Path) -> Result<Self> {
        let mut storage = Self::new(label, path);
        if path.exists() {
            storage.read_fs()?;
        }
        Ok(storage)
    }
}

impl<K, V> BaseStorage<K, V> for FileStorage<K, V>
where
    K: Ord + Clone + serde::Serialize + serde::de::DeserializeOwned,
    V: Clone + serde::Serialize + serde::de::DeserializeOwned,
{
    fn set(&mut self, key: K, value: V) {
        self.data.entries.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.data.entries.get(key)
    }

    fn remove(&mut self, id: &K) -> Result<()> {
        self.data.entries.remove(id).ok_or_else(|| {
            ProfileError::Storage(self.label.clone(), "Key not found".to_owned())
        })?;
        Ok(())
    }

    fn read_fs(&mut self) -> Result<BTreeMap<K, V>> {
        if !self.path.exists() {
            return Err(ProfileError::Storage(
                self.label.clone(),
                "File does not exist".to_owned(),
            ));
        }

        let file = fs::File::open(&self.path)?;
        let data: FileStorageData<K, V> = serde_json::from_reader(file)
            .map_err(|err| {
                ProfileError::Storage(self.label.clone(), err.to_string())
            })?;
        if data.version != STORAGE_VERSION {
            return Err(ProfileError::Storage(
                self.label.clone(),
                format!(
                    "Storage version mismatch: expected {}, got {}",
                    STORAGE_VERSION, data.version
                ),
            ));
        }
        self.data = data;

        Ok(self.data.entries.clone())
    }

    fn write_fs(&mut self) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            ProfileError::Storage(
                self.label.clone(),
                "Failed to get parent directory".to_owned(),
            )
        })?;
        fs::create_dir_all(parent_dir)?;
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &self.data).map_err(|err| {
            ProfileError::Storage(self.label.clone(), err.to_string())
        })?;

        log::info!(
            "{} {} entries have been written",
            self.label,
            self.data.entries.len()
        );
        Ok(())
    }

    fn erase(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|err| {
            ProfileError::Storage(self.label.clone(), err.to_string())
        })
    }
}

impl<K, V> AsRef<BTreeMap<K, V>> for FileStorage<K, V>
where
    K: Ord,
{
    fn as_ref(&self) -> &BTreeMap<K, V> {
        &self.data.entries
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Write;

    use quickcheck_macros::quickcheck;
    use tempdir::TempDir;

    use crate::{base_storage::BaseStorage, file_storage::FileStorage};

    #[test_log::test]
    fn test_file_storage_write_read() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file_storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);

        file_storage.set("key1".to_string(), "value1".to_string());
        file_storage.set("key2".to_string(), "value2".to_string());

        assert!(file_storage.remove(&"key1".to_string()).is_ok());
        file_storage
            .write_fs()
            .expect("Failed to write data to disk");

        let mut mirror_storage: FileStorage<String, String> =
            FileStorage::new("MirrorStorage".to_string(), &storage_path);
        let data_read: BTreeMap<_, _> = mirror_storage
            .read_fs()
            .expect("Failed to read data from disk");

        assert_eq!(data_read.len(), 1);
        assert_eq!(data_read.get("key2").map(|v: &String| v.as_str()), Some("value2"))
    }

    #[test]
    fn test_file_storage_erase() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file_storage =
            FileStorage::new("TestStorage".to_string(), &storage_path);

        file_storage.set("key1".to_string(), "value1".to_string());
        file_storage.set("key1".to_string(), "value2".to_string());
        assert!(file_storage.write_fs().is_ok());
        assert!(storage_path.exists());

        if let Err(err) = file_storage.erase() {
            panic!("Failed to delete file: {:?}", err);
        }
        assert!(!storage_path.exists());
    }

    #[test]
    fn test_remove_missing_key_is_error() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file_storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(file_storage
            .remove(&"missing".to_string())
            .is_err());
    }

    #[test]
    fn test_version_mismatch_is_error() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file = std::fs::File::create(&storage_path).unwrap();
        file.write_all(br#"{"version":99,"entries":{}}"#)
            .unwrap();

        let mut file_storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(file_storage.read_fs().is_err());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("test_storage.json");

        let mut file = std::fs::File::create(&storage_path).unwrap();
        file.write_all(b"not json at all").unwrap();

        let mut file_storage: FileStorage<String, String> =
            FileStorage::new("TestStorage".to_string(), &storage_path);
        assert!(file_storage.read_fs().is_err());
    }

    #[test]
    fn test_hydrate_missing_file_is_empty() {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("absent.json");

        let file_storage: FileStorage<String, String> =
            FileStorage::hydrate("TestStorage".to_string(), &storage_path)
                .expect("Hydration of an absent file must not fail");
        assert!(file_storage.as_ref().is_empty());
    }

    #[quickcheck]
    fn prop_write_read_roundtrip(entries: BTreeMap<String, String>) -> bool {
        let temp_dir =
            TempDir::new("tmp").expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("prop_storage.json");

        let mut file_storage =
            FileStorage::new("PropStorage".to_string(), &storage_path);
        for (key, value) in &entries {
            file_storage.set(key.clone(), value.clone());
        }
        file_storage.write_fs().unwrap();

        let mut mirror_storage: FileStorage<String, String> =
            FileStorage::new("PropMirror".to_string(), &storage_path);
        mirror_storage.read_fs().unwrap() == entries
    }
}
