//! Once-per-run package index refresh.

use crate::error::Result;
use std::sync::{PoisonError, RwLock};

/// Lets at most one successful index refresh happen per process.
///
/// Callers that arrive while the refresh runs block on the write lock and
/// then see it done. A failed refresh is not remembered, so the next caller
/// tries again.
#[derive(Debug, Default)]
pub struct UpdateGuard {
    done: RwLock<bool>,
}

impl UpdateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `refresh` unless a previous call already succeeded.
    ///
    /// # Errors
    ///
    /// Returns the error from `refresh`.
    pub fn run_once(&self, refresh: impl FnOnce() -> Result<()>) -> Result<()> {
        if *self.done.read().unwrap_or_else(PoisonError::into_inner) {
            log::debug!("package index already refreshed");
            return Ok(());
        }

        let mut done = self.done.write().unwrap_or_else(PoisonError::into_inner);
        if *done {
            return Ok(());
        }
        log::debug!("refreshing package index");
        refresh()?;
        *done = true;
        Ok(())
    }

    /// Whether a refresh has succeeded.
    pub fn is_done(&self) -> bool {
        *self.done.read().unwrap_or_else(PoisonError::into_inner)
    }
}
