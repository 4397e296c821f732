use crate::constants::OPTION_CATALOG;
use crate::desktop::DeSelection;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Option '{0}' is required by the selected desktop environment and cannot be changed")]
    Locked(String),

    #[error("Unknown optional package '{0}'")]
    Unknown(String),
}

/// A single selectable extra, i.e. one checkbox on the selection form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalPackageOption {
    pub id: String,
    pub packages: Vec<String>,
    pub checked: bool,
    pub locked: bool,
}

impl OptionalPackageOption {
    /// Creates an unchecked option from its space separated package list
    pub fn new(id: &str, packages: &str) -> Self {
        Self {
            id: id.to_owned(),
            packages: packages.split_whitespace().map(String::from).collect(),
            checked: false,
            locked: false,
        }
    }
}

/// All optional packages keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    options: BTreeMap<String, OptionalPackageOption>,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::from_catalog(OPTION_CATALOG)
    }
}

impl OptionSet {
    pub fn from_catalog(catalog: &[(&str, &str)]) -> Self {
        Self {
            options: catalog
                .iter()
                .map(|(id, packages)| (id.to_string(), OptionalPackageOption::new(id, packages)))
                .collect(),
        }
    }

    /// Built-in catalog with package lists replaced (or options added) from configuration
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Self {
        let mut set = Self::default();
        for (id, packages) in overrides {
            debug!("Option {id} installs {packages:?}");
            set.options
                .entry(id.clone())
                .or_insert_with(|| OptionalPackageOption::new(id, ""))
                .packages = packages.clone();
        }
        set
    }

    /// Resets every option and re-applies the forced and default options of `de`
    pub fn apply_de_defaults(&mut self, de: DeSelection) {
        for option in self.options.values_mut() {
            option.checked = false;
            option.locked = false;
        }

        let Some(preset) = de.preset() else {
            return;
        };

        for (ids, locked) in [(preset.locked, true), (preset.defaults, false)] {
            for id in ids {
                match self.options.get_mut(*id) {
                    Some(option) => {
                        option.checked = true;
                        option.locked = locked;
                    }
                    None => debug!("{de} references option {id} missing from the catalog"),
                }
            }
        }
    }

    /// Checks or unchecks an option on behalf of the user
    pub fn toggle(&mut self, id: &str, checked: bool) -> Result<(), SelectionError> {
        let option = self
            .options
            .get_mut(id)
            .ok_or_else(|| SelectionError::Unknown(id.to_owned()))?;

        if option.locked {
            // Re-asserting the forced state is harmless
            if checked {
                return Ok(());
            }
            return Err(SelectionError::Locked(id.to_owned()));
        }

        option.checked = checked;
        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&OptionalPackageOption> {
        self.options.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionalPackageOption> {
        self.options.values()
    }

    /// Underlying package names of every checked option, locked or not
    pub fn checked_packages(&self) -> impl Iterator<Item = &str> {
        self.options
            .values()
            .filter(|o| o.checked)
            .flat_map(|o| o.packages.iter().map(String::as_str))
    }
}
