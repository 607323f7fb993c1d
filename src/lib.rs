//! Gatepost - a membership-gated bulletin board.
//!
//! Email-verified registration, JWT sessions, and time-boxed posts with
//! per-post read/write visibility, served over a JSON API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod member;
pub mod post;
pub mod verification;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, PasswordError};
pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{GatepostError, Result};
pub use member::{Member, MemberRepository, MemberService};
pub use post::{Post, PostService};
pub use verification::{LogMailer, Mailer, VerificationService};
pub use web::WebServer;
