use std::path::PathBuf;

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use dossier_core::{Error, Result};

/// System text-to-speech binaries tried in order when none is configured.
const KNOWN_VOICES: &[&str] = &["say", "espeak", "espeak-ng", "flite"];

/// Reads a document aloud through a system text-to-speech binary.
///
/// Narration is fire-and-forget: one utterance at a time, no completion
/// tracking. The only teardown obligation is releasing the audio resource,
/// which [`stop`] (and `Drop`) handles by killing the child process.
///
/// [`stop`]: Narrator::stop
#[derive(Debug)]
pub struct Narrator {
    command: PathBuf,
    child: Option<Child>,
}

impl Narrator {
    /// Locate a usable text-to-speech binary, preferring the configured
    /// command when given.
    pub fn locate(configured: Option<&str>) -> Result<Self> {
        let command = match configured {
            Some(cmd) => which::which(cmd)
                .map_err(|_| Error::Narration(format!("narration command not found: {cmd}")))?,
            None => KNOWN_VOICES
                .iter()
                .find_map(|cmd| which::which(cmd).ok())
                .ok_or_else(|| {
                    Error::Narration("no text-to-speech binary found on PATH".to_string())
                })?,
        };
        debug!(command = %command.display(), "narrator ready");
        Ok(Self {
            command,
            child: None,
        })
    }

    /// Start reading `text` aloud, cutting off any narration still running.
    pub fn speak(&mut self, text: &str) -> Result<()> {
        self.stop();

        let mut cmd = Command::new(&self.command);
        if self
            .command
            .file_stem()
            .is_some_and(|stem| stem == "flite")
        {
            cmd.arg("-t");
        }
        cmd.arg(text);

        let child = cmd
            .spawn()
            .map_err(|e| Error::Narration(format!("failed to start narration: {e}")))?;
        self.child = Some(child);
        Ok(())
    }

    /// Wait for the current utterance to finish.
    pub async fn wait(&mut self) -> Result<()> {
        if let Some(child) = &mut self.child {
            child
                .wait()
                .await
                .map_err(|e| Error::Narration(format!("narration interrupted: {e}")))?;
            self.child = None;
        }
        Ok(())
    }

    /// Kill any running narration. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                warn!("failed to stop narration: {e}");
            }
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.stop();
    }
}
