use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
}

/// Email/password pair used for both registration and login
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Normalised email used for lookups and uniqueness
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Salted BLAKE3 digest of a password, stored as `salt$hex`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn new(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self(format!("{}${}", salt, Self::digest(&salt, password)))
    }

    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, password: &str) -> bool {
        match self.0.split_once('$') {
            Some((salt, hex)) => Self::digest(salt, password) == hex,
            None => false,
        }
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_verifies_original_password() {
        let digest = PasswordDigest::new("hunter2");
        assert!(digest.verify("hunter2"));
        assert!(!digest.verify("hunter3"));
    }

    #[test]
    fn test_digest_is_salted() {
        let a = PasswordDigest::new("same");
        let b = PasswordDigest::new("same");
        assert_ne!(a, b);
        assert!(!a.as_str().contains("same"));
    }

    #[test]
    fn test_malformed_stored_digest_never_verifies() {
        let digest = PasswordDigest::from_stored("not-a-digest");
        assert!(!digest.verify("not-a-digest"));
    }

    #[test]
    fn test_normalized_email() {
        let creds = Credentials {
            email: "  Viewer@Example.COM ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(creds.normalized_email(), "viewer@example.com");
    }
}
