// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller supplied cancellation and deadline for client operations.
//!
//! The remote capability is blocking-with-timeout, not cooperatively cancellable.
//! An [`OpContext`] is therefore only checked before an operation is handed to the
//! capability: cancelling it, or letting its deadline pass, does not interrupt a
//! call that is already in flight. The only timeout applied to in-flight calls is
//! the `timeout_ms` the capability was constructed with.

use crate::domain::errors::{ErrorCode, NacosError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation flag plus optional deadline.
///
/// Clones share the cancellation flag, so a context can be handed to a worker and
/// cancelled from elsewhere.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::OpContext;
///
/// let ctx = OpContext::background();
/// assert!(ctx.check().is_ok());
///
/// let worker_ctx = ctx.clone();
/// ctx.cancel();
/// assert!(worker_ctx.is_cancelled());
/// assert!(worker_ctx.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl OpContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now.
    ///
    /// A timeout too large to represent as an `Instant` means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    /// A context with an absolute deadline.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks this context, and every clone of it, as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails with [`ErrorCode::OperationFailed`] if cancelled or expired.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(NacosError::new(
                ErrorCode::OperationFailed,
                "operation cancelled",
            ));
        }
        if self.is_expired() {
            return Err(NacosError::new(
                ErrorCode::OperationFailed,
                "operation deadline exceeded",
            ));
        }
        Ok(())
    }
}
