//! Best-effort history of rendered posts.
//!
//! Layout: `<root>/<YYYY-MM-DD>/<safe title>/metadata.json` next to the PNG it describes.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

use crate::foundation::error::{NewsframeError, NewsframeResult};

pub const METADATA_FILE: &str = "metadata.json";
pub const POST_FILE: &str = "post.png";

const MAX_TITLE_CHARS: usize = 50;
const HASH_SEED: u64 = 0x6e77_7366_7261_6d65;

/// Fields describing one archived render.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArchiveRecord {
    pub title: String,
    pub source: String,
    pub date: String,
    /// Background origin: a URL, `manual_upload`, or empty.
    pub image_url: String,
    pub summary: String,
    pub generated_image: String,
}

/// Folder-per-title archive rooted at a workspace directory.
#[derive(Clone, Debug)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder a record for `title` lands in on the given local date.
    pub fn folder_for(&self, title: &str, now: chrono::DateTime<chrono::Local>) -> PathBuf {
        self.root
            .join(now.format("%Y-%m-%d").to_string())
            .join(safe_title(title))
    }

    /// Write `png` and merge `record` into the folder's metadata. Returns the folder.
    pub fn save(&self, record: &ArchiveRecord, png: &[u8]) -> NewsframeResult<PathBuf> {
        self.save_at(record, png, chrono::Local::now())
    }

    pub fn save_at(
        &self,
        record: &ArchiveRecord,
        png: &[u8],
        now: chrono::DateTime<chrono::Local>,
    ) -> NewsframeResult<PathBuf> {
        let folder = self.folder_for(&record.title, now);
        std::fs::create_dir_all(&folder)
            .with_context(|| format!("create archive folder '{}'", folder.display()))?;

        let meta_path = folder.join(METADATA_FILE);
        let mut meta = read_existing(&meta_path);
        let Value::Object(fields) = serde_json::to_value(record)? else {
            return Err(NewsframeError::serde("archive record is not an object"));
        };
        let obj = meta
            .as_object_mut()
            .ok_or_else(|| NewsframeError::serde("archive metadata is not an object"))?;
        obj.extend(fields);
        obj.insert("last_updated".into(), Value::String(now.to_rfc3339()));
        obj.insert("image_hash".into(), Value::String(image_hash(png)));

        let json = serde_json::to_string_pretty(&meta)?;
        std::fs::write(&meta_path, json)
            .with_context(|| format!("write '{}'", meta_path.display()))?;

        let image_name = if record.generated_image.is_empty() {
            POST_FILE
        } else {
            record.generated_image.as_str()
        };
        let image_path = folder.join(image_name);
        std::fs::write(&image_path, png)
            .with_context(|| format!("write '{}'", image_path.display()))?;

        tracing::info!(path = %image_path.display(), "archived render");
        Ok(folder)
    }
}

/// Existing metadata object, or an empty one when missing or unreadable.
fn read_existing(path: &Path) -> Value {
    let empty = Value::Object(serde_json::Map::new());
    let Ok(text) = std::fs::read_to_string(path) else {
        return empty;
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(v @ Value::Object(_)) => v,
        Ok(_) | Err(_) => {
            tracing::warn!(path = %path.display(), "discarding unreadable archive metadata");
            empty
        }
    }
}

/// Folder-safe title: characters outside word chars, `-`, `.` and space become `_`, cut to 50
/// chars and trimmed.
pub fn safe_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_TITLE_CHARS)
        .collect();
    let trimmed = replaced.trim();
    // "." and ".." would escape the date folder.
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "untitled".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Hex xxh3 digest of the encoded image.
pub fn image_hash(bytes: &[u8]) -> String {
    let mut h = Xxh3::with_seed(HASH_SEED);
    h.update(bytes);
    format!("{:016x}", h.digest())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/archive.rs"]
mod tests;
