use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of rows in the top items report
pub const DEFAULT_TOP_ITEMS_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MenustatConfig {
    pub database: Option<String>,
    pub top_items_limit: Option<usize>,
    pub allow_dangling_references: Option<bool>,
    pub check_formats: Option<bool>,
}

impl MenustatConfig {
    /// Config written by `menustat init`, with every default spelled out
    pub fn with_defaults() -> Self {
        Self {
            database: Some(default_database_path().display().to_string()),
            top_items_limit: Some(DEFAULT_TOP_ITEMS_LIMIT),
            allow_dangling_references: Some(false),
            check_formats: Some(false),
        }
    }

    pub fn top_items_limit(&self) -> usize {
        self.top_items_limit.unwrap_or(DEFAULT_TOP_ITEMS_LIMIT)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("menustat.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("menustat.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<MenustatConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: MenustatConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &MenustatConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
