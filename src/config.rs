use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, SERVICE_URL, STATE_FILE_NAME};
use crate::desktop::{AudioBackend, DeSelection};
use anyhow::{Context, anyhow};
use log::debug;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of config.toml, every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    service_url: Option<String>,
    device: Option<String>,
    de: Option<String>,
    audio: Option<String>,
    state_file: Option<PathBuf>,
    options: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: Url,
    pub device: Option<String>,
    pub de: DeSelection,
    pub audio: AudioBackend,
    pub state_file: PathBuf,
    pub options: HashMap<String, Vec<String>>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn default_state_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CONFIG_DIR_NAME)
        .join(STATE_FILE_NAME)
}

impl Config {
    /// Loads the given config file, or the default one if it exists
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => Self::read(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => ConfigFile::default(),
            },
        };

        Self::from_file(file)
    }

    fn read(path: &Path) -> anyhow::Result<ConfigFile> {
        debug!("Loading config from {}", path.display());
        let data = fs::read_to_string(path)
            .with_context(|| format!("Error reading config file {}", path.display()))?;
        Self::parse(&data)
            .with_context(|| format!("Error parsing config file {}", path.display()))
    }

    fn parse(data: &str) -> anyhow::Result<ConfigFile> {
        Ok(toml::from_str(data)?)
    }

    fn from_file(file: ConfigFile) -> anyhow::Result<Self> {
        let service_url = file.service_url.as_deref().unwrap_or(SERVICE_URL);
        let service_url = Url::parse(service_url)
            .map_err(|e| anyhow!("Invalid service URL '{}': {}", service_url, e))?;

        Ok(Self {
            service_url,
            device: file
                .device
                .map(|d| d.trim().to_owned())
                .filter(|d| !d.is_empty()),
            de: file
                .de
                .as_deref()
                .map(DeSelection::parse_lossy)
                .unwrap_or_default(),
            audio: file
                .audio
                .as_deref()
                .map(AudioBackend::parse_lossy)
                .unwrap_or_default(),
            state_file: file.state_file.unwrap_or_else(default_state_file),
            options: file.options.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(data: &str) -> anyhow::Result<Config> {
        Config::from_file(Config::parse(data)?)
    }

    #[test]
    fn test_defaults() {
        let config = config("").unwrap();

        assert_eq!(config.service_url.as_str(), SERVICE_URL);
        assert_eq!(config.de, DeSelection::None);
        assert_eq!(config.audio, AudioBackend::Pipewire);
        assert!(config.device.is_none());
        assert!(config.state_file.ends_with("isotopia/address"));
    }

    #[test]
    fn test_full_config() {
        let config = config(
            r#"
service_url = "http://localhost:8080/"
device = "pinephone-pro"
de = "sxmo"
audio = "pulseaudio"
state_file = "/tmp/isotopia-address"

[options]
comp-sway = ["sway", "swaybg"]
"#,
        )
        .unwrap();

        assert_eq!(config.service_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.device.as_deref(), Some("pinephone-pro"));
        assert_eq!(config.de, DeSelection::Sxmo);
        assert_eq!(config.audio, AudioBackend::Pulseaudio);
        assert_eq!(config.state_file, PathBuf::from("/tmp/isotopia-address"));
        assert_eq!(config.options["comp-sway"], ["sway", "swaybg"]);
    }

    #[test]
    fn test_device_is_trimmed() {
        let config = config("device = \" pinephone \"").unwrap();
        assert_eq!(config.device.as_deref(), Some("pinephone"));

        let config = self::config("device = \"   \"").unwrap();
        assert!(config.device.is_none());
    }

    #[test]
    fn test_unknown_values_degrade() {
        let config = config("de = \"gnome\"\naudio = \"jack\"").unwrap();
        assert_eq!(config.de, DeSelection::None);
        assert_eq!(config.audio, AudioBackend::Pipewire);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(config("service_url = \"not a url\"").is_err());
        assert!(config("colour = \"blue\"").is_err());
        assert!(config("de = [").is_err());
    }

    #[test]
    fn test_load_from_path() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "device = \"pinephone\"")?;

        let config = Config::load(Some(file.path()))?;
        assert_eq!(config.device.as_deref(), Some("pinephone"));

        let err = Config::load(Some(Path::new("/nonexistent/isotopia.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Error reading config file"));

        let mut broken = tempfile::NamedTempFile::new()?;
        writeln!(broken, "de = [")?;
        let err = Config::load(Some(broken.path())).unwrap_err();
        assert!(err.to_string().starts_with("Error parsing config file"));
        Ok(())
    }
}
