use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use folio::{err, error, Variables};
use folio::error::{Chainable, Result};
use folio::io::read_config;
use folio::markdown::Dialect;

use crate::CONFIG_FILES;

#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub settings: Settings,
    /// Every configured key, `src` and `dest` included.
    pub variables: Variables,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_src")]
    pub src: PathBuf,
    #[serde(default = "Settings::default_dest")]
    pub dest: PathBuf,
    #[serde(default)]
    pub highlight_theme: Option<String>,
    #[serde(default)]
    pub dialect: Dialect,
}

impl Settings {
    fn default_src() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_dest() -> PathBuf {
        PathBuf::from("./build")
    }
}

impl Config {
    /// Reads the first configuration file found in `site`.
    pub fn discover(site: &Path) -> Result<Self> {
        let Some(path) = CONFIG_FILES.iter().map(|f| site.join(f)).find(|p| p.is_file()) else {
            return err! {
                "cannot find a configuration file",
                "site directory" => site.display(),
                "expected one of" => CONFIG_FILES.join(", "),
                "to create a sample site, run" => "leaflet init <DIR>",
            };
        };

        let map: Map<String, Value> = read_config(&path)?;
        let settings: Settings = serde_json::from_value(Value::Object(map.clone()))
            .chain_with(|| error! {
                "invalid configuration",
                "path" => path.display(),
            })?;

        log::debug!("| config | {} | {} keys", path.display(), map.len());
        Ok(Config { variables: Variables::from(&map), settings, path })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn yaml_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "name: 'A bunny blog'\nfavicon: 🐇\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.settings.src, Path::new("."));
        assert_eq!(config.settings.dest, Path::new("./build"));
        assert_eq!(config.settings.dialect, Dialect::Gfm);
        assert!(config.settings.highlight_theme.is_none());
        assert_eq!(config.variables.get("name"), Some("A bunny blog"));
        assert_eq!(config.variables.get("favicon"), Some("🐇"));
    }

    #[test]
    fn settings_are_also_variables() {
        let dir = tempfile::tempdir().unwrap();
        let toml = "dest = 'out'\ndialect = 'commonmark'\nyear = 2024\n";
        fs::write(dir.path().join("_config.toml"), toml).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.settings.dest, Path::new("out"));
        assert_eq!(config.settings.dialect, Dialect::CommonMark);
        assert_eq!(config.variables.get("dest"), Some("out"));
        assert_eq!(config.variables.get("year"), Some("2024"));
    }

    #[test]
    fn yml_is_preferred() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.toml"), "name = 'toml'").unwrap();
        fs::write(dir.path().join("_config.yml"), "name: yml").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.variables.get("name"), Some("yml"));
    }

    #[test]
    fn missing_config_suggests_init() {
        let dir = tempfile::tempdir().unwrap();
        let error = Config::discover(dir.path()).unwrap_err();
        assert_eq!(error.message(), "cannot find a configuration file");
        assert!(error.to_string().contains("leaflet init"));
    }

    #[test]
    fn bad_settings_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "dialect: kramdown").unwrap();

        let error = Config::discover(dir.path()).unwrap_err();
        assert_eq!(error.message(), "invalid configuration");
        assert!(error.to_string().contains("_config.yml"));
    }
}
