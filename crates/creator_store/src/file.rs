//! Directory-backed scene store
//!
//! One JSON document per scene. The file name is the URL-safe base64
//! form of the scene name. Names are capped at `MAX_NAME_BYTES`, which
//! keeps the encoded file name well inside filesystem limits.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use creator_scene::{codec, SceneRecord};

use crate::store::{check_key, check_name, SceneStore, StoreError, StoreResult};

const EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Scene store persisting to a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_stem(name: &str) -> String {
        URL_SAFE_NO_PAD.encode(name.as_bytes())
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", Self::file_stem(name), EXTENSION))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", Self::file_stem(name), TEMP_EXTENSION))
    }

    fn name_from_path(path: &Path) -> Option<String> {
        if path.extension().map(|e| e != EXTENSION).unwrap_or(true) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let bytes = URL_SAFE_NO_PAD.decode(stem).ok()?;
        String::from_utf8(bytes).ok()
    }
}

#[async_trait(?Send)]
impl SceneStore for FileStore {
    async fn put(&self, record: &SceneRecord) -> StoreResult<()> {
        check_name(record)?;
        let encoded = codec::encode(record)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write aside then rename so a reader never sees a partial record
        let temp = self.temp_path(&record.name);
        tokio::fs::write(&temp, encoded.as_bytes()).await?;
        tokio::fs::rename(&temp, self.record_path(&record.name)).await?;

        log::debug!("file store: wrote {:?} to {:?}", record.name, self.dir);
        Ok(())
    }

    async fn get(&self, name: &str) -> StoreResult<SceneRecord> {
        let encoded = match tokio::fs::read_to_string(self.record_path(name)).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        check_key(name, codec::decode(&encoded)?)
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        match tokio::fs::remove_file(self.record_path(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("file store: delete of absent {:?}", name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_names(&self) -> StoreResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            match Self::name_from_path(&path) {
                Some(name) => names.push(name),
                None => {
                    if path.extension().map(|e| e == EXTENSION).unwrap_or(false) {
                        log::warn!("file store: skipping unrecognised file {:?}", path);
                    }
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
