//! Mount-scoped liveness for background work that reports back to a screen.
//!
//! A [`MountScope`] lives exactly as long as the screen that owns it. Tasks
//! spawned on the screen's behalf hold a [`Liveness`] handle and either race
//! their work against it ([`Liveness::run_while_alive`]) or check it before
//! touching state ([`Liveness::is_alive`]). Dropping the scope flips every
//! handle to "gone".

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Returned when the owning scope ended before the work completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmounted;

impl std::fmt::Display for Unmounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("owner unmounted before completion")
    }
}

impl std::error::Error for Unmounted {}

/// Owner side of the liveness guard. Cancels all handles on drop.
#[derive(Debug, Default)]
pub struct MountScope {
    token: CancellationToken,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap cloneable handle for spawned work.
    pub fn liveness(&self) -> Liveness {
        Liveness {
            token: self.token.child_token(),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// End the scope early. Idempotent.
    pub fn unmount(&self) {
        self.token.cancel();
    }
}

impl Drop for MountScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Observer side of the liveness guard.
#[derive(Debug, Clone)]
pub struct Liveness {
    token: CancellationToken,
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the scope ends first.
    ///
    /// An already-ended scope wins even if `fut` is immediately ready.
    pub async fn run_while_alive<F>(&self, fut: F) -> Result<F::Output, Unmounted>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Unmounted),
            out = fut => Ok(out),
        }
    }
}
