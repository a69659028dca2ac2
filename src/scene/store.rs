use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{QijiError, QijiResult};
use crate::scene::model::SharedScene;

/// Environment variable naming the [`FileStore`] directory.
pub const SHARE_DIR_ENV: &str = "QIJI_SHARE_DIR";
/// Directory used when [`SHARE_DIR_ENV`] is unset.
pub const DEFAULT_SHARE_DIR: &str = "data";

const ID_LEN: usize = 10;
const BASE62: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Opaque handle of a persisted scene: 6 to 64 chars of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareId(String);

impl ShareId {
    /// Validate an id received from outside. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> QijiResult<Self> {
        let s = s.trim();
        let ok_len = (6..=64).contains(&s.len());
        let ok_chars = s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if ok_len && ok_chars {
            Ok(Self(s.to_owned()))
        } else {
            Err(QijiError::validation(format!("invalid share id '{s}'")))
        }
    }

    /// Derive a 10-char base62 id from a payload and its creation time.
    pub fn generate(payload: &[u8], created_at_ms: u64, attempt: u32) -> Self {
        let seed = created_at_ms ^ (u64::from(attempt) << 48);
        let mut h = xxhash_rust::xxh3::xxh3_64_with_seed(payload, seed);
        // 62^10 < 2^64
        let mut out = String::with_capacity(ID_LEN);
        for _ in 0..ID_LEN {
            out.push(char::from(BASE62[(h % 62) as usize]));
            h /= 62;
        }
        Self(out)
    }

    /// The id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShareId {
    type Error = QijiError;

    fn try_from(s: String) -> QijiResult<Self> {
        Self::parse(&s)
    }
}

impl From<ShareId> for String {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

/// Persistence contract for shared scenes.
///
/// `load` never mutates scenes a caller already holds; it always returns a fresh value.
pub trait SceneStore {
    /// Persist `scene` and return its new id.
    fn save(&mut self, scene: &SharedScene) -> QijiResult<ShareId>;
    /// Fetch a previously saved scene.
    fn load(&self, id: &ShareId) -> QijiResult<SharedScene>;
}

/// On-disk record: `{ "createdAt": <ms>, "state": <scene> }`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareRecord {
    created_at: u64,
    state: serde_json::Value,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Process-local store, mostly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<ShareId, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved scenes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SceneStore for MemoryStore {
    fn save(&mut self, scene: &SharedScene) -> QijiResult<ShareId> {
        scene
            .validate()
            .map_err(|e| QijiError::save_failed(format!("refusing invalid scene: {e}")))?;
        let payload = scene.to_json_string()?;
        let created_at = now_ms();
        let mut attempt = 0;
        let id = loop {
            let id = ShareId::generate(payload.as_bytes(), created_at, attempt);
            if !self.records.contains_key(&id) {
                break id;
            }
            attempt += 1;
        };
        self.records.insert(id.clone(), payload);
        Ok(id)
    }

    fn load(&self, id: &ShareId) -> QijiResult<SharedScene> {
        let payload = self
            .records
            .get(id)
            .ok_or_else(|| QijiError::not_found(format!("share '{id}'")))?;
        SharedScene::from_json_str(payload)
    }
}

/// One `<id>.json` file per scene in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir` (created on first save).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `$QIJI_SHARE_DIR`, or `./data`.
    pub fn from_env() -> Self {
        match std::env::var_os(SHARE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::new(DEFAULT_SHARE_DIR),
        }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &ShareId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl SceneStore for FileStore {
    #[tracing::instrument(skip_all, fields(dir = %self.dir.display()))]
    fn save(&mut self, scene: &SharedScene) -> QijiResult<ShareId> {
        scene
            .validate()
            .map_err(|e| QijiError::save_failed(format!("refusing invalid scene: {e}")))?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            QijiError::save_failed(format!("create '{}': {e}", self.dir.display()))
        })?;

        let record = ShareRecord {
            created_at: now_ms(),
            state: scene.to_json_value()?,
        };
        let payload = serde_json::to_string_pretty(&record)
            .map_err(|e| QijiError::save_failed(format!("encode record: {e}")))?;

        let mut attempt = 0;
        let (id, path) = loop {
            let id = ShareId::generate(payload.as_bytes(), record.created_at, attempt);
            let path = self.path_for(&id);
            if !path.exists() {
                break (id, path);
            }
            attempt += 1;
        };
        std::fs::write(&path, payload)
            .map_err(|e| QijiError::save_failed(format!("write '{}': {e}", path.display())))?;

        tracing::info!(id = %id, version = scene.version(), "scene saved");
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load(&self, id: &ShareId) -> QijiResult<SharedScene> {
        let path = self.path_for(id);
        let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => QijiError::not_found(format!("share '{id}'")),
            _ => QijiError::not_found(format!("read '{}': {e}", path.display())),
        })?;
        let record: ShareRecord = serde_json::from_str(&raw)
            .map_err(|e| QijiError::not_found(format!("share '{id}' is unreadable: {e}")))?;
        let scene = SharedScene::from_json_value(record.state)?;
        tracing::info!(id = %id, version = scene.version(), "scene loaded");
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
