//! Command dispatch and the page loop.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use anyhow::bail;
use session::{MoodSyncOutcome, Navigator, Page, SessionStorage};
use tokio::io::AsyncBufRead;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cli::Command;
use crate::config::ClientConfig;
use crate::pages::{enter, experience, mood};
use crate::server_client::ApiClient;

/// The terminal client: configuration, the loaded session and the API client.
pub struct App {
    config: ClientConfig,
    navigator: Navigator,
    api: Arc<ApiClient>,
    pending_sync: Option<JoinHandle<MoodSyncOutcome>>,
}

impl App {
    /// Loads the session from `storage`. This is the only place it is read.
    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> anyhow::Result<Self> {
        let navigator = Navigator::load(storage)?;
        let api = Arc::new(ApiClient::new(&config.server_url));
        Ok(Self {
            config,
            navigator,
            api,
            pending_sync: None,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Runs one command, then lets any mood update still in flight finish.
    pub async fn run<R, W>(&mut self, command: Command, input: &mut R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let result = self.dispatch(command, input, out).await;
        self.settle_pending_sync(interrupted()).await;
        result
    }

    /// Waits for a mood update still in flight, giving up once `stop` fires.
    async fn settle_pending_sync(&mut self, stop: impl Future<Output = ()>) {
        let Some(mut sync) = self.pending_sync.take() else {
            return;
        };
        if !sync.is_finished() {
            debug!("Waiting for the mood update to finish");
        }

        tokio::select! {
            joined = &mut sync => {
                if let Err(e) = joined {
                    warn!(error = %e, "Mood update task failed");
                }
            }
            _ = stop => {
                warn!("Interrupted; abandoning the mood update");
                sync.abort();
            }
        }
    }

    async fn dispatch<R, W>(&mut self, command: Command, input: &mut R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        match command {
            Command::Start => self.flow(Page::Experience, input, out).await,
            Command::Enter { name: None } => self.flow(Page::Enter, input, out).await,
            Command::Enter { name: Some(name) } => {
                self.navigator.visit(Page::Enter);
                match enter::submit(&mut self.navigator, &self.api, &name).await {
                    Ok(page) => self.flow(page, input, out).await,
                    Err(e) => {
                        writeln!(out, "{e}")?;
                        bail!("registration failed: {e}")
                    }
                }
            }
            Command::Mood { mood: None } => self.flow(Page::Mood, input, out).await,
            Command::Mood { mood: Some(picked) } => {
                if self.navigator.visit(Page::Mood) != Page::Mood {
                    writeln!(out, "Register a name first.")?;
                    return self.flow(Page::Enter, input, out).await;
                }
                let selection = mood::choose(
                    &mut self.navigator,
                    self.api.clone(),
                    picked,
                    self.config.transition_delay(),
                    out,
                )
                .await?;
                self.pending_sync = Some(selection.sync);
                self.flow(selection.page, input, out).await
            }
            Command::Experience => self.flow(Page::Experience, input, out).await,
            Command::ChangeMood => {
                let page = self.navigator.change_mood();
                self.flow(page, input, out).await
            }
            Command::Status => self.status(out),
            Command::Reset => {
                self.navigator.reset()?;
                writeln!(out, "Session cleared.")?;
                Ok(())
            }
        }
    }

    /// Shows pages starting at `requested` until the visitor leaves.
    async fn flow<R, W>(&mut self, requested: Page, input: &mut R, out: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut page = self.navigator.visit(requested);

        loop {
            debug!(page = %page, "Showing page");
            page = match page {
                Page::Enter => match enter::run(&mut self.navigator, &self.api, input, out).await? {
                    Some(next) => next,
                    None => return Ok(()),
                },
                Page::Mood => {
                    let selection = mood::run(
                        &mut self.navigator,
                        self.api.clone(),
                        self.config.transition_delay(),
                        input,
                        out,
                    )
                    .await?;
                    match selection {
                        Some(selection) => {
                            self.pending_sync = Some(selection.sync);
                            selection.page
                        }
                        None => return Ok(()),
                    }
                }
                Page::Experience => {
                    experience::run(&self.navigator, self.config.target_year, out, interrupted())
                        .await?;
                    return Ok(());
                }
            };
        }
    }

    fn status<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let session = self.navigator.session();

        writeln!(out, "Phase:  {:?}", session.phase())?;
        match session.identity() {
            Some(identity) => writeln!(out, "User:   {} (#{})", identity.user_name, identity.user_id)?,
            None => writeln!(out, "User:   -")?,
        }
        match session.selected_mood() {
            Some(mood) => writeln!(out, "Mood:   {}", mood.theme().name)?,
            None => writeln!(out, "Mood:   -")?,
        }
        writeln!(out, "Server: {}", self.api.server_url())?;
        writeln!(out, "Session file: {}", self.config.session_path.display())?;
        Ok(())
    }
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
