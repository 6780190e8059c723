//! Authentication ports: token issuance/verification and password hashing.

use uuid::Uuid;

/// Claims carried by a verified bearer token. Identity only: role and
/// active status are re-checked against the store on every admin-gated
/// request, so deactivation takes effect without token revocation.
#[derive(Debug, Clone, Copy)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Signed, time-bounded bearer credentials. A pure sign/verify pair keyed by
/// process-wide configuration; no persistence.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user. Expiry is fixed at issuance.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify signature and expiry. Tampering and expiry fail distinctly.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Configured token lifetime in seconds.
    fn expires_in_secs(&self) -> i64;
}

/// One-way password hashing.
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Compare a plaintext against a stored hash. The plaintext is never
    /// reconstructed or logged.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    Hashing(String),
}
