use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SummarizerConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub oracle: Option<OracleSection>,
    pub chunking: Option<ChunkingSection>,
    pub layout: Option<LayoutSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleSection {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingSection {
    pub chunk_size: Option<usize>,
    pub min_chunk_chars: Option<usize>,
    pub max_input_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSection {
    pub gap_threshold: Option<f32>,
    pub x_tolerance: Option<f32>,
    pub y_tolerance: Option<f32>,
}

/// Platform config directory path: `<config_dir>/pdf-summarizer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdf-summarizer").join("config.toml"))
}

/// Load config by cascading CWD `.pdf-summarizer.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdf-summarizer.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bo = base.oracle.unwrap_or_default();
    let oo = overlay.oracle.unwrap_or_default();
    let bc = base.chunking.unwrap_or_default();
    let oc = overlay.chunking.unwrap_or_default();
    let bl = base.layout.unwrap_or_default();
    let ol = overlay.layout.unwrap_or_default();

    ConfigFile {
        oracle: Some(OracleSection {
            api_url: oo.api_url.or(bo.api_url),
            api_key: oo.api_key.or(bo.api_key),
            request_timeout_secs: oo.request_timeout_secs.or(bo.request_timeout_secs),
        }),
        chunking: Some(ChunkingSection {
            chunk_size: oc.chunk_size.or(bc.chunk_size),
            min_chunk_chars: oc.min_chunk_chars.or(bc.min_chunk_chars),
            max_input_chars: oc.max_input_chars.or(bc.max_input_chars),
        }),
        layout: Some(LayoutSection {
            gap_threshold: ol.gap_threshold.or(bl.gap_threshold),
            x_tolerance: ol.x_tolerance.or(bl.x_tolerance),
            y_tolerance: ol.y_tolerance.or(bl.y_tolerance),
        }),
    }
}

impl ConfigFile {
    /// Apply file values on top of `config`; unset fields leave it unchanged.
    pub fn apply_to(&self, config: &mut SummarizerConfig) {
        if let Some(ref oracle) = self.oracle {
            if let Some(ref url) = oracle.api_url {
                config.api_url = url.clone();
            }
            if let Some(ref key) = oracle.api_key {
                config.api_key = Some(key.clone());
            }
            if let Some(secs) = oracle.request_timeout_secs {
                config.request_timeout_secs = secs;
            }
        }
        if let Some(ref chunking) = self.chunking {
            if let Some(n) = chunking.chunk_size {
                config.chunk_size = n;
            }
            if let Some(n) = chunking.min_chunk_chars {
                config.min_chunk_chars = n;
            }
            if let Some(n) = chunking.max_input_chars {
                config.max_input_chars = n;
            }
        }
        if let Some(ref layout) = self.layout {
            if let Some(v) = layout.gap_threshold {
                config.gap_threshold = v;
            }
            if let Some(v) = layout.x_tolerance {
                config.x_tolerance = v;
            }
            if let Some(v) = layout.y_tolerance {
                config.y_tolerance = v;
            }
        }
    }
}

/// Override `config` with `HF_API_KEY` / `HF_API_URL` when set and non-empty.
pub fn apply_env(config: &mut SummarizerConfig) {
    if let Ok(key) = std::env::var("HF_API_KEY") {
        if !key.is_empty() {
            config.api_key = Some(key);
        }
    }
    if let Ok(url) = std::env::var("HF_API_URL") {
        if !url.is_empty() {
            config.api_url = url;
        }
    }
}

/// Defaults, then config files, then environment.
pub fn resolve_config() -> SummarizerConfig {
    let mut config = SummarizerConfig::default();
    load_config().apply_to(&mut config);
    apply_env(&mut config);
    config
}
