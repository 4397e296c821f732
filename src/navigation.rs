//! Page address parameters, the only state that survives a reload.

use crate::fingerprint::Fingerprint;
use anyhow::Context;
use log::debug;
use reqwest::Url;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const DEVICE_PARAM: &str = "device";
const MD5SUM_PARAM: &str = "md5sum";
const ERROR_PARAM: &str = "error";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    pub device: Option<String>,
    pub md5sum: Option<Fingerprint>,
    pub error: bool,
}

impl NavigationParams {
    pub fn request(device: &str, md5sum: Fingerprint) -> Self {
        Self {
            device: Some(device.to_owned()),
            md5sum: Some(md5sum),
            error: false,
        }
    }

    pub fn error() -> Self {
        Self {
            error: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Device and fingerprint, if the address points at a request
    pub fn target(&self) -> Option<(&str, &Fingerprint)> {
        match (&self.device, &self.md5sum) {
            (Some(device), Some(md5sum)) if !device.is_empty() && !md5sum.as_str().is_empty() => {
                Some((device.as_str(), md5sum))
            }
            _ => None,
        }
    }

    /// Page address for these parameters, relative to `base`
    pub fn encode(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        if self.is_empty() {
            return url;
        }

        {
            let mut query = url.query_pairs_mut();
            if let Some(device) = &self.device {
                query.append_pair(DEVICE_PARAM, device);
            }
            if let Some(md5sum) = &self.md5sum {
                query.append_pair(MD5SUM_PARAM, md5sum.as_str());
            }
            if self.error {
                query.append_pair(ERROR_PARAM, "true");
            }
        }
        url
    }

    pub fn decode(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                DEVICE_PARAM => params.device = Some(value.into_owned()),
                MD5SUM_PARAM => params.md5sum = Some(Fingerprint::from(value.into_owned())),
                ERROR_PARAM => params.error = value == "true",
                other => debug!("Ignoring address parameter {other}"),
            }
        }
        params
    }
}

/// Where the current page address is kept between reloads.
pub trait ParamsStore {
    fn load(&self) -> anyhow::Result<NavigationParams>;
    fn store(&mut self, params: &NavigationParams) -> anyhow::Result<()>;
}

/// Keeps the page address as a single line in a state file.
pub struct FileStore {
    path: PathBuf,
    base: Url,
}

impl FileStore {
    pub fn new(path: PathBuf, base: Url) -> Self {
        Self { path, base }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParamsStore for FileStore {
    fn load(&self) -> anyhow::Result<NavigationParams> {
        if !self.path.exists() {
            return Ok(NavigationParams::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed reading {}", self.path.display()))?;
        let address = data.trim();
        if address.is_empty() {
            return Ok(NavigationParams::default());
        }

        let url = Url::parse(address)
            .with_context(|| format!("Invalid address in {}", self.path.display()))?;
        Ok(NavigationParams::decode(&url))
    }

    fn store(&mut self, params: &NavigationParams) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed creating {}", dir.display()))?;

        let address = params.encode(&self.base);
        debug!("Navigating to {address}");

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .context("Failed creating temporary state file")?;
        writeln!(file, "{address}").context("Failed writing state file")?;
        file.persist(&self.path)
            .with_context(|| format!("Failed writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://catacombing.org/isotopia/").unwrap()
    }

    #[test]
    fn test_encode_request() {
        let params = NavigationParams::request("pinephone pro", "abc".into());
        let url = params.encode(&base());

        assert_eq!(
            url.as_str(),
            "https://catacombing.org/isotopia/?device=pinephone+pro&md5sum=abc"
        );
        assert_eq!(NavigationParams::decode(&url), params);
    }

    #[test]
    fn test_empty_params_clear_query() {
        let url = Url::parse("https://catacombing.org/isotopia/?error=true").unwrap();
        let cleared = NavigationParams::default().encode(&url);

        assert_eq!(cleared.as_str(), "https://catacombing.org/isotopia/");
        assert!(NavigationParams::decode(&cleared).is_empty());
    }

    #[test]
    fn test_error_flag_requires_true() {
        let url = Url::parse("https://catacombing.org/isotopia/?error=1&utm=x").unwrap();
        assert!(!NavigationParams::decode(&url).error);

        let url = NavigationParams::error().encode(&base());
        assert!(NavigationParams::decode(&url).error);
    }

    #[test]
    fn test_target_needs_both_parameters() {
        let params = NavigationParams {
            device: Some("pinephone".into()),
            ..Default::default()
        };
        assert!(params.target().is_none());

        let params = NavigationParams::request("pinephone", "".into());
        assert!(params.target().is_none());

        let params = NavigationParams::request("pinephone", "abc".into());
        let md5sum = Fingerprint::from("abc");
        assert_eq!(params.target(), Some(("pinephone", &md5sum)));
    }

    #[test]
    fn test_file_store_survives_reload() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/address");

        let mut store = FileStore::new(path.clone(), base());
        assert!(store.load()?.is_empty());

        let params = NavigationParams::request("pinephone", "abc".into());
        store.store(&params)?;

        let reloaded = FileStore::new(path, base());
        assert_eq!(reloaded.load()?, params);

        store.store(&NavigationParams::default())?;
        assert!(reloaded.load()?.is_empty());
        Ok(())
    }
}
