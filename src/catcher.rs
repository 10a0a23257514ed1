//! Supervision of the external AIS receiver process

use std::net::SocketAddr;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::{config::CatcherConfig, errors::AisSyncError};

/// Running AIS receiver, killed on drop if not shut down explicitly
pub struct Catcher {
    program: String,
    child: Child,
}

impl Catcher {
    /// Start the receiver forwarding sentences to `target`.
    ///
    /// Returns None when the receiver is disabled in configuration. Waits for
    /// the configured startup delay before returning.
    pub async fn spawn(
        config: &CatcherConfig,
        target: SocketAddr,
    ) -> Result<Option<Self>, AisSyncError> {
        if !config.enabled {
            info!("AIS receiver process disabled, expecting sentences from elsewhere");
            return Ok(None);
        }
        config.validate()?;

        let args = config.args(target);
        info!("Starting {} {}", config.program, args.join(" "));

        let child = Command::new(&config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AisSyncError::ProcessError {
                program: config.program.clone(),
                origin: e.to_string(),
            })?;

        tokio::time::sleep(config.startup_delay).await;

        Ok(Some(Self {
            program: config.program.clone(),
            child,
        }))
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Terminate the receiver and wait for it to exit
    pub async fn shutdown(mut self) -> Result<(), AisSyncError> {
        if let Some(status) = self.child.try_wait()? {
            warn!("{} had already exited: {}", self.program, status);
            return Ok(());
        }

        self.child
            .kill()
            .await
            .map_err(|e| AisSyncError::ProcessError {
                program: self.program.clone(),
                origin: e.to_string(),
            })?;
        info!("{} terminated", self.program);
        Ok(())
    }
}
