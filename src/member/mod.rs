//! Member lifecycle module for Gatepost.
//!
//! Registration, authentication lookup, password change, and
//! unregistration.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::MemberRepository;
pub use service::{AccountError, MemberService, RegistrationError};
pub use types::{Member, NewMember, DEFAULT_PICTURE};
