//! Content addressing of build requests.
//!
//! The build service keys requests by the MD5 sum of the canonical package list joined
//! with single spaces, so the client has to hash exactly the same bytes.

use crate::packages::PackageList;
use md5::{Digest, Md5};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn fingerprint(packages: &PackageList) -> Fingerprint {
    let mut hasher = Md5::new();
    hasher.update(packages.joined().as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}
