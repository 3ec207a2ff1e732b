//! Shutdown signals

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?;

        tokio::select! {
            result = signal::ctrl_c() => {
                result.map(|()| "ctrl_c").map_err(ShutdownSignalError::CtrlC)
            }
            _ = terminate.recv() => Ok("terminate"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c()
            .await
            .map(|()| "ctrl_c")
            .map_err(ShutdownSignalError::CtrlC)
    }
}

/// Stop `handle` once a shutdown signal arrives, letting in-flight requests finish for up to
/// `grace`.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(signal, grace_seconds = grace.as_secs(), "shutting down");

    handle.stop_graceful(Some(grace));

    Ok(())
}
