//! Email verification module for Gatepost.
//!
//! Six-digit codes, three-minute expiry, one pending record per address.

pub mod mailer;
pub mod repository;
pub mod service;
pub mod types;

pub use mailer::{LogMailer, Mailer};
pub use repository::EmailVerificationRepository;
pub use service::{generate_code, VerificationError, VerificationService};
pub use types::{EmailVerification, CODE_LENGTH, CODE_TTL_SECS};
