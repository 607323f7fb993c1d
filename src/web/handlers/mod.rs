//! API handlers for the Gatepost web API.

pub mod auth;
pub mod member;
pub mod post;
pub mod signup;

pub use auth::*;
pub use member::*;
pub use post::*;
pub use signup::*;
