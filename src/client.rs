use crate::fingerprint::Fingerprint;
use crate::packages::PackageList;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Status request to {url} failed: {status}")]
    Transport { url: Url, status: StatusCode },

    #[error("Build request was rejected: {status}")]
    Submission { status: StatusCode },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service URL cannot hold request paths: {0}")]
    InvalidBase(Url),
}

/// Progress of a request as reported by the build service.
///
/// A request the service does not know about has no status at all, which is modelled
/// as `None` wherever a status is looked up.
#[derive(EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum BuildStatus {
    Pending,
    Building,
    Writing,
    Done,
}

impl BuildStatus {
    /// Whether the service has accepted the request and not finished it yet
    pub fn in_progress(&self) -> bool {
        matches!(self, Self::Pending | Self::Building | Self::Writing)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildRequest {
    pub packages: PackageList,
    pub device: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    md5sum: Fingerprint,
}

/// The remote build service as seen by the client.
pub trait BuildService {
    fn get_status(
        &self,
        device: &str,
        md5sum: &Fingerprint,
    ) -> Result<Option<BuildStatus>, ClientError>;

    /// Requests a new build, returning the fingerprint the service stored it under
    fn submit_build(&self, request: &BuildRequest) -> Result<Fingerprint, ClientError>;

    fn image_url(&self, device: &str, md5sum: &Fingerprint) -> Result<Url, ClientError>;
}

/// Reads a status body, which is either a JSON string or the bare token.
/// Anything that is not a known status counts as absent.
fn parse_status(body: &str) -> Option<BuildStatus> {
    let token = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_owned());
    match BuildStatus::from_str(&token) {
        Ok(status) => Some(status),
        Err(_) => {
            warn!("Ignoring unknown build status {body:?}");
            None
        }
    }
}

pub struct HttpBuildService {
    client: Client,
    base: Url,
}

impl HttpBuildService {
    pub fn new(base: Url) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBase(base));
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBase(self.base.clone()))?
            .pop_if_empty()
            .push("requests")
            .extend(segments);
        Ok(url)
    }

    /// Streams the finished image into `out`, returning the number of bytes written
    pub fn fetch_image(
        &self,
        device: &str,
        md5sum: &Fingerprint,
        out: &mut impl Write,
    ) -> Result<u64, ClientError> {
        let url = self.image_url(device, md5sum)?;
        debug!("GET {url}");
        let mut response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.copy_to(out)?)
    }
}

impl BuildService for HttpBuildService {
    fn get_status(
        &self,
        device: &str,
        md5sum: &Fingerprint,
    ) -> Result<Option<BuildStatus>, ClientError> {
        let url = self.endpoint(&[device, md5sum.as_str(), "status"])?;
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(parse_status(&response.text()?)),
            status => Err(ClientError::Transport { url, status }),
        }
    }

    fn submit_build(&self, request: &BuildRequest) -> Result<Fingerprint, ClientError> {
        let url = self.endpoint(&[])?;
        debug!("POST {url} ({} packages)", request.packages.len());
        let response = self.client.post(url).json(request).send()?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::Submission {
                status: response.status(),
            });
        }

        let body: SubmitResponse = response.json()?;
        Ok(body.md5sum)
    }

    fn image_url(&self, device: &str, md5sum: &Fingerprint) -> Result<Url, ClientError> {
        self.endpoint(&[device, md5sum.as_str(), "image"])
    }
}
