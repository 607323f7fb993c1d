//! Data Transfer Objects for the Gatepost web API.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
