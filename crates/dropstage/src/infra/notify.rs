//! User-facing reporting of staging problems.

use tracing::{error, warn};

/// Surfaces staging problems to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Reports a failure that skipped part of the user's request.
    fn critical(&self, message: &str);

    /// Reports a problem the user can fix and retry.
    fn warning(&self, message: &str);
}

/// Notifier that reports through the tracing subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn critical(&self, message: &str) {
        error!("{message}");
    }

    fn warning(&self, message: &str) {
        warn!("{message}");
    }
}
