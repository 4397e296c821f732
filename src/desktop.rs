use crate::constants::{
    CATACOMB_PRESET, DePreset, PHOSH_PRESET, PIPEWIRE_PACKAGE, PLASMA_PRESET, PULSEAUDIO_PACKAGE,
    SXMO_PRESET,
};
use clap::ValueEnum;
use log::warn;
use strum::{Display, EnumIter, EnumString};

/// The desktop environment preset an image is built around.
#[derive(
    ValueEnum,
    EnumIter,
    EnumString,
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
)]
#[strum(serialize_all = "lowercase")]
pub enum DeSelection {
    Catacomb,
    Sxmo,
    Phosh,
    Plasma,
    #[default]
    None,
}

impl DeSelection {
    /// Parses a DE name, falling back to `None` for anything unrecognised.
    pub fn parse_lossy(s: &str) -> Self {
        s.trim().parse::<Self>().unwrap_or_else(|_| {
            warn!("Unknown desktop environment '{s}', using none");
            Self::None
        })
    }

    pub fn preset(&self) -> Option<&'static DePreset> {
        match self {
            Self::Catacomb => Some(&CATACOMB_PRESET),
            Self::Sxmo => Some(&SXMO_PRESET),
            Self::Phosh => Some(&PHOSH_PRESET),
            Self::Plasma => Some(&PLASMA_PRESET),
            Self::None => None,
        }
    }

    pub fn mandatory_packages(&self) -> &'static [&'static str] {
        self.preset().map_or(&[], |p| p.mandatory)
    }
}

#[derive(
    ValueEnum,
    EnumIter,
    EnumString,
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
)]
#[strum(serialize_all = "lowercase")]
pub enum AudioBackend {
    Pulseaudio,
    #[default]
    Pipewire,
}

impl AudioBackend {
    /// Parses an audio backend name, falling back to pipewire for anything unrecognised.
    pub fn parse_lossy(s: &str) -> Self {
        s.trim().parse::<Self>().unwrap_or_else(|_| {
            warn!("Unknown audio backend '{s}', using pipewire");
            Self::Pipewire
        })
    }

    pub fn package(&self) -> &'static str {
        match self {
            Self::Pulseaudio => PULSEAUDIO_PACKAGE,
            Self::Pipewire => PIPEWIRE_PACKAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_lossy_known_values() {
        assert_eq!(DeSelection::parse_lossy("sxmo"), DeSelection::Sxmo);
        assert_eq!(DeSelection::parse_lossy(" plasma "), DeSelection::Plasma);
        assert_eq!(
            AudioBackend::parse_lossy("pulseaudio"),
            AudioBackend::Pulseaudio
        );
    }

    #[test]
    fn test_parse_lossy_unknown_values_degrade() {
        assert_eq!(DeSelection::parse_lossy("gnome"), DeSelection::None);
        assert_eq!(AudioBackend::parse_lossy("alsa"), AudioBackend::Pipewire);
        assert_eq!(AudioBackend::parse_lossy(""), AudioBackend::Pipewire);
    }

    #[test]
    fn test_display_matches_wire_names() {
        let names: Vec<String> = DeSelection::iter().map(|de| de.to_string()).collect();
        assert_eq!(names, ["catacomb", "sxmo", "phosh", "plasma", "none"]);
        assert_eq!(AudioBackend::default().to_string(), "pipewire");
    }

    #[test]
    fn test_none_has_no_packages() {
        assert!(DeSelection::None.preset().is_none());
        assert!(DeSelection::None.mandatory_packages().is_empty());
        assert_eq!(AudioBackend::Pipewire.package(), "pipewire-pulse");
    }
}
