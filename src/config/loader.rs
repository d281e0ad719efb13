use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::Value;

use crate::config::model::{LayoutConfig, TemplateConfig};
use crate::foundation::error::NewsframeResult;

/// File name of a per-requester template inside its user directory.
pub const USER_TEMPLATE_FILE: &str = "template_config.json";

/// Source of template configuration for one render.
///
/// Implementations decide how a per-requester override relates to the shared default. Loaders
/// are read-only; a render never mutates the configuration it was handed.
pub trait ConfigLoader: Send + Sync {
    /// Load the effective template for `requester` (`None` means the shared default).
    fn load(&self, requester: Option<&str>) -> NewsframeResult<TemplateConfig>;

    /// Directory relative font and logo paths are resolved against.
    fn assets_root(&self) -> Option<&Path> {
        None
    }

    /// Load and flatten in one step.
    fn layout(&self, requester: Option<&str>) -> NewsframeResult<LayoutConfig> {
        let template = self.load(requester)?;
        Ok(LayoutConfig::resolve(&template, self.assets_root()))
    }
}

/// Loader over an in-memory template. The requester id is ignored.
#[derive(Clone, Debug, Default)]
pub struct StaticConfigLoader {
    template: TemplateConfig,
    assets_root: Option<PathBuf>,
}

impl StaticConfigLoader {
    pub fn new(template: TemplateConfig) -> Self {
        Self {
            template,
            assets_root: None,
        }
    }

    pub fn from_json(json: &str) -> NewsframeResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = Some(root.into());
        self
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _requester: Option<&str>) -> NewsframeResult<TemplateConfig> {
        Ok(self.template.clone())
    }

    fn assets_root(&self) -> Option<&Path> {
        self.assets_root.as_deref()
    }
}

/// Loader reading a shared default template plus optional per-requester overrides from disk.
///
/// The requester file at `<users_dir>/<id>/template_config.json` is deep-merged over the default:
/// objects merge key by key, any other value replaces. Missing files are not errors; malformed
/// files are logged and skipped so a broken override never blocks rendering.
#[derive(Clone, Debug, Default)]
pub struct FileConfigLoader {
    default_path: Option<PathBuf>,
    users_dir: Option<PathBuf>,
    assets_root: Option<PathBuf>,
}

impl FileConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    pub fn with_users_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.users_dir = Some(dir.into());
        self
    }

    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = Some(root.into());
        self
    }

    fn user_path(&self, requester: &str) -> Option<PathBuf> {
        // Requester ids become a single path segment.
        if requester.is_empty()
            || requester.contains(['/', '\\'])
            || requester == "."
            || requester == ".."
        {
            tracing::warn!(requester, "ignoring unsafe requester id");
            return None;
        }
        self.users_dir
            .as_ref()
            .map(|dir| dir.join(requester).join(USER_TEMPLATE_FILE))
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self, requester: Option<&str>) -> NewsframeResult<TemplateConfig> {
        let shared = self
            .default_path
            .as_deref()
            .and_then(read_json_lenient)
            .unwrap_or_else(|| Value::Object(Default::default()));

        if let Some(path) = requester.and_then(|r| self.user_path(r)) {
            if let Some(v) = read_json_lenient(&path) {
                tracing::debug!(path = %path.display(), "applying requester template");
                let mut merged = shared.clone();
                merge_json(&mut merged, v);
                match serde_json::from_value::<TemplateConfig>(merged) {
                    Ok(cfg) => return Ok(cfg),
                    Err(err) => tracing::error!(
                        %err,
                        path = %path.display(),
                        "requester template has invalid values, skipping it"
                    ),
                }
            }
        }

        match serde_json::from_value::<TemplateConfig>(shared) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                tracing::error!(%err, "template has invalid values, using defaults");
                Ok(TemplateConfig::default())
            }
        }
    }

    fn assets_root(&self) -> Option<&Path> {
        self.assets_root.as_deref()
    }
}

fn read_json_lenient(path: &Path) -> Option<Value> {
    if !path.is_file() {
        return None;
    }
    let parsed = std::fs::read_to_string(path)
        .with_context(|| format!("read template '{}'", path.display()))
        .and_then(|s| {
            serde_json::from_str::<Value>(&s)
                .with_context(|| format!("parse template '{}'", path.display()))
        });
    match parsed {
        Ok(v @ Value::Object(_)) => Some(v),
        Ok(_) => {
            tracing::error!(path = %path.display(), "template root must be a JSON object");
            None
        }
        Err(err) => {
            tracing::error!(err = format!("{err:#}"), "failed to load template");
            None
        }
    }
}

/// Deep-merge `overlay` into `base`.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (k, v) in overlay {
                match base.get_mut(&k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/loader.rs"]
mod tests;
