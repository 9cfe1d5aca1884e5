use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "woosh.config.json";

/// Woosh configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory containing template JSON files
    pub src_dir: String,

    /// Directory compiled MJML is written to
    pub out_dir: String,

    /// Fonts selected in new templates
    pub default_fonts: Vec<String>,

    pub default_title: String,

    pub default_preview_line: String,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|err| anyhow::anyhow!("Invalid {}: {}", config_path.display(), err))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: "templates".to_string(),
            out_dir: "dist".to_string(),
            default_fonts: vec![woosh_schema::DEFAULT_FONT.to_string()],
            default_title: "Title".to_string(),
            default_preview_line: "Preview text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "emails",
            "outDir": "build/mjml",
            "defaultFonts": ["Roboto", "Lato"],
            "defaultTitle": "Newsletter"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir, "build/mjml");
        assert_eq!(config.default_fonts, vec!["Roboto", "Lato"]);
        assert_eq!(config.default_title, "Newsletter");
        assert_eq!(config.default_preview_line, "Preview text");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "templates");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.default_fonts, vec!["Ubuntu"]);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = std::env::temp_dir().join("woosh-config-missing");
        assert_eq!(Config::load(&dir).unwrap(), Config::default());
    }
}
