mod args;
mod client;
mod config;
mod constants;
mod controller;
mod desktop;
mod fingerprint;
mod interactive;
mod navigation;
mod options;
mod packages;
mod timer;

use anyhow::{Context, anyhow};
use args::{Command, SelectionArgs};
use clap::Parser;
use client::HttpBuildService;
use config::Config;
use console::style;
use controller::{Controller, UiState};
use desktop::DeSelection;
use fingerprint::fingerprint;
use log::{LevelFilter, debug, info};
use navigation::FileStore;
use options::OptionSet;
use packages::Selection;
use std::path::Path;
use std::thread;
use std::time::Instant;

type HttpController = Controller<HttpBuildService, FileStore>;

fn main() -> anyhow::Result<()> {
    // Get struct of args using clap
    let app = args::App::parse();

    // Set up logging
    let mut builder = pretty_env_logger::formatted_timed_builder();
    let log_level = if app.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    builder.filter_level(log_level);
    builder.init();

    let config = Config::load(app.config.as_deref())?;
    debug!("{config:?}");

    // Match command from arguments and run relevant code
    match app.cmd {
        Command::Options(command) => list_options(&config, command.de),
        Command::Packages(selection) => list_packages(&config, &selection),
        Command::Submit(command) => {
            let device = device(&config, &command.selection)?;
            let selection = selection(&config, &command.selection)?;
            request_build(&config, &device, &selection, command.noconfirm, command.no_wait)
        }
        Command::Build(command) => {
            let (device, selection) = interactive::prompt_selection(&config)?;
            request_build(&config, &device, &selection, false, command.no_wait)
        }
        Command::Status => status(&config),
        Command::Watch => watch(&config),
        Command::Download(command) => download(&config, command.output.as_deref(), command.overwrite),
        Command::Cancel => cancel(&config),
    }?;

    Ok(())
}

fn controller(config: &Config) -> anyhow::Result<HttpController> {
    let service = HttpBuildService::new(config.service_url.clone())
        .context("Failed setting up the build service client")?;
    let store = FileStore::new(config.state_file.clone(), config.service_url.clone());
    debug!("Navigation state in {}", store.path().display());
    Ok(Controller::new(service, store))
}

fn device(config: &Config, args: &SelectionArgs) -> anyhow::Result<String> {
    args.device
        .clone()
        .or_else(|| config.device.clone())
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| anyhow!("No device given, pass --device or set `device` in the config"))
}

/// Builds the selection form state: DE defaults first, then the user's toggles
fn selection(config: &Config, args: &SelectionArgs) -> anyhow::Result<Selection> {
    let mut selection = Selection::new(
        config.de,
        args.audio.unwrap_or(config.audio),
        OptionSet::with_overrides(&config.options),
    );
    if let Some(de) = args.de {
        selection.set_de(de);
    }
    selection.apply_toggles(&args.with, &args.without)?;
    Ok(selection)
}

fn list_options(config: &Config, de: Option<DeSelection>) -> anyhow::Result<()> {
    let mut options = OptionSet::with_overrides(&config.options);
    let de = de.unwrap_or(config.de);
    options.apply_de_defaults(de);

    println!("Optional packages for {}:", style(de).bold());
    for option in options.iter() {
        let mark = match (option.checked, option.locked) {
            (true, true) => style("[x] required").red(),
            (true, false) => style("[x]").green(),
            _ => style("[ ]").dim(),
        };
        println!("{mark} {} ({})", option.id, option.packages.join(" "));
    }
    Ok(())
}

fn list_packages(config: &Config, args: &SelectionArgs) -> anyhow::Result<()> {
    let packages = selection(config, args)?.packages();
    for package in packages.as_slice() {
        println!("{package}");
    }
    println!("md5sum: {}", style(fingerprint(&packages)).bold());
    Ok(())
}

/// Waits out pending builds, reloading whenever the poll timer fires
fn wait(controller: &mut HttpController) -> anyhow::Result<UiState> {
    while controller.state() == UiState::PendingPrompt && controller.timer().is_pending() {
        if let Some(remaining) = controller.timer().remaining(Instant::now()) {
            thread::sleep(remaining);
        }
        if let Some(state) = controller.poll(Instant::now())? {
            interactive::render(state, controller.params());
        }
    }
    Ok(controller.state())
}

fn request_build(
    config: &Config,
    device: &str,
    selection: &Selection,
    noconfirm: bool,
    no_wait: bool,
) -> anyhow::Result<()> {
    let mut controller = controller(config)?;

    let mut state = controller.submit(device, selection)?;
    if state == UiState::StartBuildPrompt {
        interactive::render(state, controller.params());
        state = if noconfirm || interactive::confirm_start_build(device)? {
            controller.confirm_build(device, selection)?
        } else {
            controller.cancel()?
        };
    }
    interactive::render(state, controller.params());

    if !no_wait {
        wait(&mut controller)?;
    }
    Ok(())
}

fn status(config: &Config) -> anyhow::Result<()> {
    let mut controller = controller(config)?;
    let state = controller.load()?;
    interactive::render(state, controller.params());
    Ok(())
}

fn watch(config: &Config) -> anyhow::Result<()> {
    let mut controller = controller(config)?;
    let state = controller.load()?;
    interactive::render(state, controller.params());
    wait(&mut controller)?;
    Ok(())
}

fn cancel(config: &Config) -> anyhow::Result<()> {
    let mut controller = controller(config)?;
    let state = controller.cancel()?;
    interactive::render(state, controller.params());
    Ok(())
}

fn download(config: &Config, output: Option<&Path>, overwrite: bool) -> anyhow::Result<()> {
    let mut controller = controller(config)?;
    let state = controller.load()?;
    if state != UiState::DownloadPrompt {
        interactive::render(state, controller.params());
        return Err(anyhow!("No finished image to download"));
    }

    let url = controller.confirm_download()?;
    let Some(output) = output else {
        println!("{url}");
        return Ok(());
    };

    if output.exists() && !overwrite {
        return Err(anyhow!(
            "{} already exists, pass --overwrite to replace it",
            output.display()
        ));
    }

    let (device, md5sum) = controller
        .params()
        .target()
        .ok_or_else(|| anyhow!("No build request selected"))?;

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed creating a temporary file in {}", dir.display()))?;

    info!("Downloading {url}");
    let written = controller
        .service()
        .fetch_image(device, md5sum, file.as_file_mut())
        .context("Failed downloading the image")?;

    file.persist(output)
        .with_context(|| format!("Failed writing {}", output.display()))?;
    info!("Wrote {} bytes to {}", written, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::load(Some(Path::new("/dev/null"))).unwrap()
    }

    #[test]
    fn test_device_is_trimmed() {
        let args = SelectionArgs {
            device: Some(" pinephone ".into()),
            ..Default::default()
        };
        assert_eq!(device(&config(), &args).unwrap(), "pinephone");

        let args = SelectionArgs {
            device: Some("  ".into()),
            ..Default::default()
        };
        assert!(device(&config(), &args).is_err());
    }

    #[test]
    fn test_config_device_is_fallback() {
        let mut config = config();
        config.device = Some("pinephone-pro".into());
        assert_eq!(
            device(&config, &SelectionArgs::default()).unwrap(),
            "pinephone-pro"
        );
    }
}
