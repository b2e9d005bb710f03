use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Transport configuration loaded from `~/.config/rprobe/config.toml`.
///
/// The prober itself has no tunables; every field here configures the HTTP
/// transport it sends through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall limit for a HEAD probe, in seconds.
    pub timeout_secs: u64,
    /// GET transfers are aborted when slower than this many bytes/s...
    #[serde(default = "default_low_speed_limit")]
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds.
    #[serde(default = "default_low_speed_time")]
    pub low_speed_time_secs: u64,
    /// Follow 3xx redirects and report on the final response.
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow. When the limit is hit, the last
    /// redirect is reported as the response status (e.g. `NotRetrievable`
    /// with 302) instead of a transport error.
    pub max_redirections: u32,
    /// Optional `User-Agent` override.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Extra request headers sent with every probe (e.g. cookies, auth).
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_low_speed_limit() -> u32 {
    1024
}

fn default_low_speed_time() -> u64 {
    60
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            low_speed_limit_bytes: default_low_speed_limit(),
            low_speed_time_secs: default_low_speed_time(),
            follow_redirects: true,
            max_redirections: 10,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rprobe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProbeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ProbeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ProbeConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ProbeConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
