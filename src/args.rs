use crate::desktop::{AudioBackend, DeSelection};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(name = "isotopia", about = "Request custom mobile Linux images", version, author)]
pub struct App {
    /// Verbose output
    #[clap(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Path to a config file [default: <config dir>/isotopia/config.toml]
    #[clap(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Parser, Debug, Clone)]
pub enum Command {
    #[clap(name = "options", about = "List optional packages for a desktop environment")]
    Options(OptionsCommand),
    #[clap(name = "packages", about = "Print the package list and request fingerprint")]
    Packages(SelectionArgs),
    #[clap(name = "submit", about = "Request an image for the selected packages")]
    Submit(SubmitCommand),
    #[clap(name = "build", about = "Interactively select packages and request an image")]
    Build(BuildCommand),
    #[clap(name = "status", about = "Show the state of the current request")]
    Status,
    #[clap(name = "watch", about = "Wait for the current request to finish building")]
    Watch,
    #[clap(name = "download", about = "Download the finished image")]
    Download(DownloadCommand),
    #[clap(name = "cancel", about = "Forget the current request")]
    Cancel,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Target device
    #[clap(short = 'd', long = "device", value_name = "DEVICE")]
    pub device: Option<String>,

    /// Desktop environment
    #[clap(long = "de", value_enum)]
    pub de: Option<DeSelection>,

    /// Audio backend
    #[clap(long = "audio", value_enum)]
    pub audio: Option<AudioBackend>,

    /// Check an optional package
    #[clap(short = 'w', long = "with", value_name = "OPTION")]
    pub with: Vec<String>,

    /// Uncheck an optional package
    #[clap(short = 'W', long = "without", value_name = "OPTION")]
    pub without: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct OptionsCommand {
    /// Desktop environment
    #[clap(long = "de", value_enum)]
    pub de: Option<DeSelection>,
}

#[derive(Parser, Debug, Clone)]
pub struct SubmitCommand {
    #[clap(flatten)]
    pub selection: SelectionArgs,

    /// Start new builds without asking
    #[clap(long = "noconfirm")]
    pub noconfirm: bool,

    /// Return instead of waiting for a pending build
    #[clap(long = "no-wait")]
    pub no_wait: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildCommand {
    /// Return instead of waiting for a pending build
    #[clap(long = "no-wait")]
    pub no_wait: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadCommand {
    /// Write the image to this file instead of printing its location
    #[clap(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[clap(long = "overwrite")]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        App::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let app = App::try_parse_from([
            "isotopia",
            "-v",
            "submit",
            "--device",
            "pinephone",
            "--de",
            "sxmo",
            "--with",
            "browser-kumo",
            "-W",
            "editor-vim",
            "--noconfirm",
        ])
        .unwrap();

        assert!(app.verbose);
        let Command::Submit(submit) = app.cmd else {
            panic!("Expected submit command");
        };
        assert_eq!(submit.selection.de, Some(DeSelection::Sxmo));
        assert_eq!(submit.selection.with, ["browser-kumo"]);
        assert_eq!(submit.selection.without, ["editor-vim"]);
        assert!(submit.noconfirm);
        assert!(!submit.no_wait);
    }

    #[test]
    fn test_rejects_unknown_de() {
        assert!(App::try_parse_from(["isotopia", "packages", "--de", "gnome"]).is_err());
    }
}
