//! Optional `repoforge.toml` in the working tree.
//!
//! Precedence: CLI flag / env var, then this file, then the interactive
//! prompt. The service role key is deliberately not a config field — secrets
//! are never read from or written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CONFIG_FILE: &str = "repoforge.toml";

const DEFAULT_PRIMARY_BRANCH: &str = "main";
const DEFAULT_TEMPLATES_DIR: &str = "templates/pr";
const DEFAULT_SETUP_SCRIPT: &str = "scripts/setup.sh";

/// Hosted repository defaults (`[remote]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Default owner offered at the prompt.
    pub owner: Option<String>,
    /// Default repository name offered at the prompt.
    pub name: Option<String>,
    /// Primary branch every feature branch forks from.
    pub primary_branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            owner: None,
            name: None,
            primary_branch: DEFAULT_PRIMARY_BRANCH.to_string(),
        }
    }
}

/// Storage provider defaults (`[storage]`). The service key is never here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage REST endpoint, e.g. `https://abc.supabase.co`.
    pub endpoint: Option<String>,
}

/// Conventional paths (`[paths]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding per-branch PR body templates.
    pub templates_dir: PathBuf,
    /// Local setup script delegated to in the final stage.
    pub setup_script: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            setup_script: PathBuf::from(DEFAULT_SETUP_SCRIPT),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub paths: PathsConfig,
}

impl ForgeConfig {
    /// Load `repoforge.toml` from `work_dir`.
    ///
    /// A missing file yields the defaults; a malformed file is logged and
    /// ignored rather than failing the run.
    pub fn load(work_dir: &Path) -> Self {
        let path = work_dir.join(CONFIG_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }
}
