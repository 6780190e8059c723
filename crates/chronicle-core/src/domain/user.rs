use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::PasswordService;

/// User role. Only admins can author and manage blogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// User entity. Emails are stored lowercase; the unique-email invariant is
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative profile changes (maintenance paths, not the HTTP surface).
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl User {
    /// Create a new user record: validates the fields, normalizes the email
    /// and hashes the plaintext password before it ever reaches a store.
    pub fn register(
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        is_active: bool,
        passwords: &dyn PasswordService,
    ) -> Result<Self, DomainError> {
        let mut errors = Vec::new();
        if name.trim().is_empty() {
            errors.push("Please provide a name".to_string());
        }
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            errors.push("Please provide a valid email".to_string());
        }
        if password.is_empty() {
            errors.push("Please provide a password".to_string());
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let password_hash = passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email,
            password_hash,
            role,
            is_active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login keys compare on trimmed lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AuthError;

    /// Stand-in hasher so domain tests stay free of argon2.
    struct ReverseHasher;

    impl PasswordService for ReverseHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.chars().rev().collect())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(self.hash(password)? == hash)
        }
    }

    #[test]
    fn register_normalizes_email_and_hashes_password() {
        let user = User::register(
            "Ada",
            "  Ada@Example.COM ",
            "hunter2secret",
            Role::Admin,
            true,
            &ReverseHasher,
        )
        .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "hunter2secret");
        assert!(ReverseHasher.verify("hunter2secret", &user.password_hash).unwrap());
        assert!(user.is_admin());
    }

    #[test]
    fn register_collects_all_field_errors() {
        let err = User::register("", "not-an-email", "", Role::User, true, &ReverseHasher)
            .unwrap_err();

        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
