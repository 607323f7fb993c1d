//! Outbound mail seam for verification codes.
//!
//! Mail transport is an external collaborator; the engine only needs a way
//! to dispatch a code to an address. The default implementation writes to
//! the log, which is enough for development and keeps SMTP out of the core.

use crate::Result;

/// Outbound mail dispatch for verification codes.
pub trait Mailer: Send + Sync {
    /// Send a verification code to the given address.
    fn send_verification_code(&self, to: &str, code: &str) -> Result<()>;
}

/// Mailer that writes the outbound message to the log.
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Create a new LogMailer with the given from address.
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

impl Mailer for LogMailer {
    fn send_verification_code(&self, to: &str, code: &str) -> Result<()> {
        tracing::info!(
            from = %self.from,
            to = %to,
            "Dispatching signup verification code: {}",
            code
        );
        Ok(())
    }
}
