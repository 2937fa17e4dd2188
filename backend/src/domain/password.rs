//! One-way credential hashing backed by bcrypt.
//!
//! Hashing is CPU bound. Async callers should run [`PasswordHasher::hash`]
//! and [`PasswordHasher::verify`] on the blocking pool.

use thiserror::Error;

/// Longest input bcrypt accepts, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;
/// Lowest cost factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Failures raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// The password is longer than bcrypt can hash without truncation.
    #[error("password is {length} bytes; bcrypt accepts at most {max}")]
    TooLong { length: usize, max: usize },
    /// bcrypt rejected the input for another reason.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
}

/// Rejected cost factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {0}")]
pub struct InvalidCost(pub u32);

/// bcrypt hasher with a fixed cost factor.
///
/// # Examples
/// ```
/// use accounts::domain::PasswordHasher;
///
/// let hasher = PasswordHasher::default();
/// let hash = hasher.hash("SawitPro123$").expect("hash");
/// assert!(hasher.verify(&hash, "SawitPro123$"));
/// assert!(!hasher.verify(&hash, "wrong"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: MIN_COST }
    }
}

impl PasswordHasher {
    /// Build a hasher, rejecting costs bcrypt cannot use.
    pub fn new(cost: u32) -> Result<Self, InvalidCost> {
        if (MIN_COST..=MAX_COST).contains(&cost) {
            Ok(Self { cost })
        } else {
            Err(InvalidCost(cost))
        }
    }

    /// Configured cost factor.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `password` with a fresh random salt.
    ///
    /// Inputs over [`MAX_PASSWORD_BYTES`] are rejected rather than silently
    /// truncated.
    pub fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let length = password.len();
        if length > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::TooLong {
                length,
                max: MAX_PASSWORD_BYTES,
            });
        }
        bcrypt::hash(password, self.cost).map_err(|err| PasswordHashError::Hashing {
            message: err.to_string(),
        })
    }

    /// Check `candidate` against a stored hash.
    ///
    /// Malformed hashes and mismatches both yield `false`.
    #[must_use]
    pub fn verify(&self, hash: &str, candidate: &str) -> bool {
        bcrypt::verify(candidate, hash).unwrap_or(false)
    }
}
