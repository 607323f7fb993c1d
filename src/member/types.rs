//! Member model for Gatepost.

/// Default profile picture assigned on first persist.
pub const DEFAULT_PICTURE: &str = "/profile_image.png";

/// Member entity representing a registered member.
///
/// The email is the identity and never changes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Member {
    /// Email address (unique, immutable key).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Display name (unique).
    pub name: String,
    /// Profile picture URL.
    pub picture: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new member.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Email address.
    pub email: String,
    /// Password hash (pre-hashed with Argon2).
    pub password: String,
    /// Display name.
    pub name: String,
    /// Profile picture URL (defaults to the stock asset).
    pub picture: Option<String>,
}

impl NewMember {
    /// Create a new member with the required fields.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            picture: None,
        }
    }

    /// Set the profile picture URL.
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_builder() {
        let member = NewMember::new("a@x.com", "hash", "Alice");
        assert_eq!(member.email, "a@x.com");
        assert_eq!(member.password, "hash");
        assert_eq!(member.name, "Alice");
        assert!(member.picture.is_none());

        let member = member.with_picture("/custom.png");
        assert_eq!(member.picture.as_deref(), Some("/custom.png"));
    }
}
