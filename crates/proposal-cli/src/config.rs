use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Session directory that holds `proposal_assets/`.
    pub base_dir: PathBuf,
    /// Directory of full-page attachment images appended to every build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments_dir: Option<PathBuf>,
    #[serde(default)]
    pub defaults: FieldDefaults,
}

/// Values used when `build` is run without the corresponding flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub recipient: String,
    pub proposer: String,
    pub tel: String,
    pub primary: String,
    pub accent: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            recipient: "수신기관명".to_string(),
            proposer: "뉴고려병원".to_string(),
            tel: "1833 - 9988".to_string(),
            primary: "#4A148C".to_string(),
            accent: "#D4AF37".to_string(),
        }
    }
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_dir: dirs::data_dir()
                .map(|d| d.join("proposal"))
                .unwrap_or_else(|| PathBuf::from(".")),
            attachments_dir: None,
            defaults: FieldDefaults::default(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("proposal").join("config.json"))
}

/// Load the config at `path`, or the defaults when no file exists yet.
pub fn load_config(path: &Path) -> eyre::Result<ProposalConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ProposalConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config at {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    if on_disk_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {on_disk_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    let config: ProposalConfig = serde_json::from_value(json)?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &ProposalConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
