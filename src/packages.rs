use crate::desktop::{AudioBackend, DeSelection};
use crate::options::{OptionSet, SelectionError};
use serde::Serialize;
use std::collections::BTreeSet;

/// Canonical package list of a build request: deduplicated and sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageList(Vec<String>);

impl PackageList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Single space separated form, the input of the request fingerprint
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for PackageList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        Self(set.into_iter().collect())
    }
}

/// Derives the package list for a DE, its checked options and an audio backend
pub fn resolve(de: DeSelection, options: &OptionSet, audio: AudioBackend) -> PackageList {
    de.mandatory_packages()
        .iter()
        .copied()
        .chain(options.checked_packages())
        .chain(std::iter::once(audio.package()))
        .collect()
}

/// Everything the selection form holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub de: DeSelection,
    pub options: OptionSet,
    pub audio: AudioBackend,
}

impl Selection {
    /// Selection with the DE's forced and default options applied
    pub fn new(de: DeSelection, audio: AudioBackend, mut options: OptionSet) -> Self {
        options.apply_de_defaults(de);
        Self { de, options, audio }
    }

    pub fn set_de(&mut self, de: DeSelection) {
        self.de = de;
        self.options.apply_de_defaults(de);
    }

    /// Applies user toggles on top of the DE defaults
    pub fn apply_toggles(&mut self, with: &[String], without: &[String]) -> Result<(), SelectionError> {
        for id in with {
            self.options.toggle(id, true)?;
        }
        for id in without {
            self.options.toggle(id, false)?;
        }
        Ok(())
    }

    pub fn packages(&self) -> PackageList {
        resolve(self.de, &self.options, self.audio)
    }
}
