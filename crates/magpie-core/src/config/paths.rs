use std::path::PathBuf;

/// Configuration paths for the Magpie panel modules
pub struct ConfigPaths {
    pub settings: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));

        Self {
            settings: config_dir.join("magpie/settings.json"),
        }
    }

    /// Get the magpie config directory
    pub fn config_dir(&self) -> PathBuf {
        self.settings.parent().unwrap_or(&PathBuf::from(".")).to_path_buf()
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}
