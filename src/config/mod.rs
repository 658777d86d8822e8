mod company;
mod session;

pub use company::{ApiSettings, Company, Config, DisplaySettings, PdfSettings};
pub use session::Session;

use crate::error::{AppError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG-style, or ~/.freightdocs/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "freightdocs") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".freightdocs"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Output directory from config; relative paths are taken from the config dir.
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        cfg_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(AppError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(AppError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| AppError::ConfigParse { path, source: e })
}

/// Load session.toml, failing when nobody is logged in
pub fn load_session(cfg_dir: &Path) -> Result<Session> {
    let path = cfg_dir.join("session.toml");
    if !path.exists() {
        return Err(AppError::NotLoggedIn);
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| AppError::ConfigParse { path, source: e })
}

/// Save session.toml
pub fn save_session(cfg_dir: &Path, session: &Session) -> Result<()> {
    let path = cfg_dir.join("session.toml");
    let content = toml::to_string_pretty(session).map_err(|e| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Remove session.toml. Returns whether a session existed.
pub fn clear_session(cfg_dir: &Path) -> Result<bool> {
    let path = cfg_dir.join("session.toml");
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
url = "https://sheetdb.io/api/v1/your-sheet-id"
# timeout_secs = 10     # optional, no timeout when unset

[company]
name = "TRANSPORTSJADIANI"
address = "Carrer de la Logística, 123"
city = "08039 Barcelona, Espanya"
# legal_notice = "Registered in the Barcelona Mercantile Registry"   # optional

[display]
language = "ca"          # en, ca, es, fr, pt
currency_symbol = "€"

[pdf]
output_dir = "output"    # relative to this directory, or an absolute/~ path
"#;
