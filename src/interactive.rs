use crate::config::Config;
use crate::controller::UiState;
use crate::desktop::{AudioBackend, DeSelection};
use crate::navigation::NavigationParams;
use crate::options::OptionSet;
use crate::packages::Selection;
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use log::{info, warn};
use strum::IntoEnumIterator;

/// Prompts for the device and every part of the package selection
pub fn prompt_selection(config: &Config) -> anyhow::Result<(String, Selection)> {
    info!("Starting interactive setup...");

    let theme = ColorfulTheme::default();

    let mut device = Input::<String>::with_theme(&theme).with_prompt("Enter device");
    if let Some(default) = &config.device {
        device = device.default(default.clone());
    }
    let device = device
        .validate_with(|s: &String| {
            if s.trim().is_empty() {
                Err("Device cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let des: Vec<DeSelection> = DeSelection::iter().collect();
    let de_index = Select::with_theme(&theme)
        .with_prompt("Select a desktop environment")
        .items(&des)
        .default(des.iter().position(|de| *de == config.de).unwrap_or(0))
        .interact()?;

    let audio_backends: Vec<AudioBackend> = AudioBackend::iter().collect();
    let audio_index = Select::with_theme(&theme)
        .with_prompt("Select an audio backend")
        .items(&audio_backends)
        .default(
            audio_backends
                .iter()
                .position(|audio| *audio == config.audio)
                .unwrap_or(0),
        )
        .interact()?;

    let mut selection = Selection::new(
        des[de_index],
        audio_backends[audio_index],
        OptionSet::with_overrides(&config.options),
    );
    prompt_options(&mut selection)?;

    Ok((device.trim().to_owned(), selection))
}

fn prompt_options(selection: &mut Selection) -> anyhow::Result<()> {
    let options: Vec<(String, bool, bool)> = selection
        .options
        .iter()
        .map(|o| (o.id.clone(), o.checked, o.locked))
        .collect();

    let items: Vec<String> = options
        .iter()
        .map(|(id, _, locked)| {
            if *locked {
                format!("{id} (required)")
            } else {
                id.clone()
            }
        })
        .collect();
    let defaults: Vec<bool> = options.iter().map(|(_, checked, _)| *checked).collect();

    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select optional packages")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    for (i, (id, _, locked)) in options.iter().enumerate() {
        let checked = chosen.contains(&i);
        if *locked && !checked {
            warn!("{id} is required by {}, keeping it", selection.de);
            continue;
        }
        selection.options.toggle(id, checked)?;
    }

    Ok(())
}

/// Asks whether a new build should be requested
pub fn confirm_start_build(device: &str) -> anyhow::Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("No image with these packages exists for {device}. Request a build?"))
        .default(true)
        .interact()?)
}

/// Prints the prompt for the given state
pub fn render(state: UiState, params: &NavigationParams) {
    let target = params
        .target()
        .map(|(device, md5sum)| format!(" ({device}, {md5sum})"))
        .unwrap_or_default();

    match state {
        UiState::Idle => println!("No build request selected."),
        UiState::StartBuildPrompt => println!(
            "{}{target}",
            style("No image with these packages has been requested yet.").bold()
        ),
        UiState::PendingPrompt => println!(
            "{}{target}",
            style("Your image is being built, checking again shortly.").yellow()
        ),
        UiState::DownloadPrompt => println!(
            "{}{target}\nRun `isotopia download` to fetch it.",
            style("Your image is ready.").green().bold()
        ),
        UiState::ErrorPrompt => println!(
            "{}\nRun `isotopia cancel` and try again.",
            style("The build request failed.").red().bold()
        ),
    }
}

