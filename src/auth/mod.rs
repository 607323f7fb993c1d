//! Password hashing and policy for Gatepost.

pub mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS,
};
