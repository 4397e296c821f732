use crate::client::{BuildRequest, BuildService, BuildStatus};
use crate::constants::POLL_DELAY;
use crate::fingerprint::fingerprint;
use crate::navigation::{NavigationParams, ParamsStore};
use crate::packages::Selection;
use crate::timer::PollTimer;
use anyhow::{Context, anyhow};
use log::{error, info, warn};
use reqwest::Url;
use std::time::Instant;
use strum::Display;

/// The prompt currently shown to the user.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    StartBuildPrompt,
    PendingPrompt,
    DownloadPrompt,
    ErrorPrompt,
}

/// Drives the build request lifecycle from user actions and remote build status.
///
/// All state that has to survive a reload lives in the [`ParamsStore`]; every navigation
/// writes the new parameters there and then re-runs [`Controller::load`].
pub struct Controller<S, P> {
    service: S,
    store: P,
    params: NavigationParams,
    state: UiState,
    timer: PollTimer,
}

impl<S: BuildService, P: ParamsStore> Controller<S, P> {
    pub fn new(service: S, store: P) -> Self {
        Self {
            service,
            store,
            params: NavigationParams::default(),
            state: UiState::Idle,
            timer: PollTimer::new(POLL_DELAY),
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn params(&self) -> &NavigationParams {
        &self.params
    }

    pub fn timer(&self) -> &PollTimer {
        &self.timer
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn enter(&mut self, state: UiState) -> UiState {
        if self.state != state {
            info!("{} -> {}", self.state, state);
        }
        self.state = state;
        state
    }

    /// Page load: rebuilds the state from the stored address and the remote status
    pub fn load(&mut self) -> anyhow::Result<UiState> {
        // A fresh load drops whatever reload the previous page had pending
        self.timer.cancel();

        let state = match self.page_state() {
            Ok(state) => state,
            Err(e) => {
                self.enter(UiState::Idle);
                return Err(e);
            }
        };

        if state == UiState::PendingPrompt {
            self.timer.schedule(Instant::now());
        }

        Ok(self.enter(state))
    }

    fn page_state(&mut self) -> anyhow::Result<UiState> {
        self.params = self.store.load().context("Failed reading navigation state")?;

        if self.params.error {
            return Ok(UiState::ErrorPrompt);
        }

        let Some((device, md5sum)) = self.params.target() else {
            return Ok(UiState::Idle);
        };

        let status = self
            .service
            .get_status(device, md5sum)
            .with_context(|| format!("Failed checking request {md5sum} for {device}"))?;

        Ok(match status {
            Some(BuildStatus::Done) => UiState::DownloadPrompt,
            Some(status) if status.in_progress() => UiState::PendingPrompt,
            _ => UiState::StartBuildPrompt,
        })
    }

    /// Runs the pending reload once it is due, returning the reloaded state
    pub fn poll(&mut self, now: Instant) -> anyhow::Result<Option<UiState>> {
        if !self.timer.fire(now) {
            return Ok(None);
        }
        self.load().map(Some)
    }

    fn navigate(&mut self, params: NavigationParams) -> anyhow::Result<UiState> {
        self.store
            .store(&params)
            .context("Failed writing navigation state")?;
        self.load()
    }

    /// "Submit": shows the existing request for this selection, or offers to start one
    pub fn submit(&mut self, device: &str, selection: &Selection) -> anyhow::Result<UiState> {
        let packages = selection.packages();
        let md5sum = fingerprint(&packages);
        info!("Checking for an existing request {md5sum} ({} packages)", packages.len());

        let status = self
            .service
            .get_status(device, &md5sum)
            .with_context(|| format!("Failed checking request {md5sum} for {device}"))?;

        match status {
            Some(status) => {
                info!("Request {md5sum} already exists ({status})");
                self.navigate(NavigationParams::request(device, md5sum))
            }
            // Stay on this page so the current selection is kept
            None => Ok(self.enter(UiState::StartBuildPrompt)),
        }
    }

    /// "Confirm build": submits the request and follows it by the service's fingerprint
    pub fn confirm_build(&mut self, device: &str, selection: &Selection) -> anyhow::Result<UiState> {
        let request = BuildRequest {
            packages: selection.packages(),
            device: device.to_owned(),
        };

        match self.service.submit_build(&request) {
            Ok(md5sum) => {
                let local = fingerprint(&request.packages);
                if local != md5sum {
                    warn!("Service stored the request as {md5sum}, expected {local}");
                }
                info!("Build requested as {md5sum}");
                self.navigate(NavigationParams::request(device, md5sum))
            }
            Err(e) => {
                error!("{e}");
                self.navigate(NavigationParams::error())
            }
        }
    }

    /// "Cancel": clears the address, the selection itself is left alone
    pub fn cancel(&mut self) -> anyhow::Result<UiState> {
        self.navigate(NavigationParams::default())
    }

    /// "Confirm download": location of the image for the current address
    pub fn confirm_download(&self) -> anyhow::Result<Url> {
        let (device, md5sum) = self
            .params
            .target()
            .ok_or_else(|| anyhow!("No build request selected"))?;

        Ok(self.service.image_url(device, md5sum)?)
    }
}
